use cosmic::iced::Alignment;
use cosmic::widget::{button, icon, row, text};
use cosmic::{Element, theme};

use crate::message::Message;

/// Render a task label chip with a tag icon.
pub fn label_tag(label: &str) -> Element<'static, Message> {
    button::custom(
        row()
            .spacing(4)
            .align_y(Alignment::Center)
            .push(icon::from_name("tag-symbolic").size(12).icon())
            .push(text::caption(label.to_string()).size(11.0)),
    )
    .padding([2, 8])
    .class(theme::Button::Text)
    .into()
}
