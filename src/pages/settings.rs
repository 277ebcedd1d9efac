use cosmic::iced::{Alignment, Length};
use cosmic::widget::{column, row, text, text_input};
use cosmic::Element;

use jasper::config::JasperConfig;

use crate::fl;
use crate::message::Message;

pub fn settings_view<'a>(config: &'a JasperConfig, persistent: bool) -> Element<'a, Message> {
    let mut content = column().spacing(12);

    // --- Debug logging ---
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body(fl!("settings-debug-logging")).width(Length::Fill))
            .push(
                cosmic::widget::toggler(config.debug_logging)
                    .on_toggle(|_| Message::ToggleDebugLogging),
            ),
    );

    // --- Storage ---
    content = content.push(text::title4(fl!("settings-data-directory")));
    content = content.push(
        text_input::text_input("", config.data_directory.display().to_string())
            .width(Length::Fill),
    );
    if !persistent {
        content = content.push(text::caption(fl!("settings-storage-unavailable")));
    }

    content.into()
}
