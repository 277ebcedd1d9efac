use cosmic::iced::Length;
use cosmic::iced::widget::progress_bar;
use cosmic::widget::{column, container, text};
use cosmic::Element;

use crate::fl;
use crate::message::Message;

/// Percentage readout over a bar filled to the same share.
///
/// `percent` is the rounded readout; `fraction` is the unrounded share that
/// fills the bar.
pub fn completion_summary(percent: u32, fraction: f32) -> Element<'static, Message> {
    let readout = column()
        .spacing(4)
        .align_x(cosmic::iced::Alignment::Center)
        .push(text::title1(format!("{}%", percent)))
        .push(text::body(fl!("tasks-completed")));

    column()
        .spacing(12)
        .width(Length::Fill)
        .push(container(readout).center_x(Length::Fill))
        .push(progress_bar(0.0..=100.0, fraction.clamp(0.0, 100.0)))
        .into()
}
