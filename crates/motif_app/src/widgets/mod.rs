//! The five showcase widgets

pub mod dot_loader;
pub mod morphing;
pub mod progress_loader;
pub mod scale_effect;
pub mod spin_loader;

pub use dot_loader::DotLoaderWidget;
pub use morphing::MorphingWidget;
pub use progress_loader::ProgressLoaderWidget;
pub use scale_effect::ScaleEffectWidget;
pub use spin_loader::SpinLoaderWidget;

#[cfg(test)]
pub(crate) fn test_context(
    name: &'static str,
) -> (motif_animation::AnimationScheduler, crate::widget::WidgetContext) {
    let scheduler = motif_animation::AnimationScheduler::new();
    let cx = crate::widget::WidgetContext::new(
        name,
        motif_core::ReactiveGraph::shared(),
        scheduler.handle(),
    );
    (scheduler, cx)
}
