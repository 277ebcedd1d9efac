use cosmic::iced::{Alignment, Color, Length};
use cosmic::widget::{button, container, icon, row, text};
use cosmic::{Element, theme};

use jasper::core::task::Task;

use crate::components::label_tag::label_tag;
use crate::message::Message;

const DIMMED: Color = Color::from_rgb(0.55, 0.55, 0.55);

// Column widths for consistent alignment
const COL_TOGGLE: f32 = 36.0;
const COL_DATE: f32 = 56.0;
const COL_DELETE: f32 = 40.0;

/// Overlay U+0336 on every character. Iced text has no strikethrough style.
fn struck_through(s: &str) -> String {
    s.chars().flat_map(|c| [c, '\u{0336}']).collect()
}

fn toggle_icon(completed: bool) -> &'static str {
    if completed {
        "checkbox-checked-symbolic"
    } else {
        "checkbox-symbolic"
    }
}

/// One list row: toggle, text, label chip, deadline, delete.
pub fn task_row(task: &Task) -> Element<'static, Message> {
    let id = task.id.clone();

    let toggle = container(
        button::icon(icon::from_name(toggle_icon(task.completed)))
            .on_press(Message::ToggleTask(id.clone())),
    )
    .width(Length::Fixed(COL_TOGGLE));

    let title: Element<'static, Message> = if task.completed {
        text::body(struck_through(&task.text))
            .class(theme::Text::Color(DIMMED))
            .into()
    } else {
        text::body(task.text.clone()).into()
    };

    let mut r = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(toggle)
        .push(container(title).width(Length::Fill));

    if task.has_label() {
        r = r.push(label_tag(&task.label));
    }

    if let Some(deadline) = task.deadline_display() {
        r = r.push(container(text::caption(deadline)).width(Length::Fixed(COL_DATE)));
    }

    r = r.push(
        container(
            button::icon(icon::from_name("edit-delete-symbolic"))
                .on_press(Message::RemoveTask(id)),
        )
        .width(Length::Fixed(COL_DELETE)),
    );

    container(r.width(Length::Fill))
        .padding([8, 12])
        .class(theme::Container::Card)
        .width(Length::Fill)
        .into()
}
