mod catalog;
mod collision;
mod crafting;
mod display;
mod draw;
mod effects;
mod layout;
mod motion;
mod progress;
mod proximity;
mod scene_impl;
mod session;
mod streak;

use engine::{Scene, Viewport};

use crate::app::tuning::WorkshopTuning;

pub(crate) use progress::Difficulty;

pub(crate) fn build_scene(tuning: WorkshopTuning, viewport: Viewport) -> Box<dyn Scene> {
    Box::new(scene_impl::WorkshopScene::new(tuning, viewport))
}
