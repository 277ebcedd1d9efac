use cosmic::iced::Length;
use cosmic::widget::{button, column, container, divider, icon, scrollable, text};
use cosmic::Element;

use jasper::core::store::TaskStore;

use crate::components::completion_summary::completion_summary;
use crate::components::task_row::task_row;
use crate::fl;
use crate::message::Message;

/// Main page: add trigger, task rows in store order, completion summary.
pub fn tasks_view(store: &TaskStore) -> Element<'static, Message> {
    let add_button = button::suggested(fl!("add-new-task"))
        .leading_icon(icon::from_name("list-add-symbolic"))
        .on_press(Message::OpenNewTaskDialog)
        .width(Length::Fill);

    let mut content = column().spacing(16).push(add_button);

    if store.is_empty() {
        content = content.push(
            container(text::body(fl!("tasks-empty")))
                .padding(32)
                .center_x(Length::Fill),
        );
    } else {
        let mut rows = column().spacing(8);
        for task in store.tasks() {
            rows = rows.push(task_row(task));
        }
        content = content.push(rows);
    }

    content = content
        .push(divider::horizontal::default())
        .push(completion_summary(
            store.completion_percentage(),
            store.completion_fraction(),
        ));

    container(scrollable(content.padding(16).width(Length::Fill)).height(Length::Fill))
        .max_width(560.0)
        .center_x(Length::Fill)
        .height(Length::Fill)
        .into()
}
