use cosmic::app::{Core, Task as CosmicTask, context_drawer};
use cosmic::iced::Length;
use cosmic::widget::{self, button, column, container, icon, row, scrollable, text, text_input};
use cosmic::{Application, Element, executor};

use jasper::config::{APP_ID, JasperConfig};
use jasper::core::draft::NewTaskDialog;
use jasper::core::store::TaskStore;
use jasper::storage::{self, FileStore, StorageError};

use crate::fl;
use crate::message::Message;
use crate::pages;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextDrawerState {
    Settings,
}

pub struct Jasper {
    core: Core,
    config: JasperConfig,
    cosmic_config: cosmic::cosmic_config::Config,

    // Data
    store: TaskStore,
    /// False when the saved list could not be opened and tasks only live in memory.
    persistent: bool,

    // UI state
    new_task: NewTaskDialog,
    context_drawer_state: Option<ContextDrawerState>,
}

pub struct Flags {
    pub config: JasperConfig,
    pub cosmic_config: cosmic::cosmic_config::Config,
}

impl Application for Jasper {
    type Executor = executor::Default;
    type Flags = Flags;
    type Message = Message;

    const APP_ID: &'static str = APP_ID;

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, CosmicTask<Self::Message>) {
        let config = flags.config;
        let cosmic_config = flags.cosmic_config;

        let opened = config
            .ensure_data_dir()
            .map_err(StorageError::from)
            .and_then(|()| {
                storage::open_task_store(FileStore::new(&config.data_directory), config.id_scheme)
            });
        let (store, persistent) = match opened {
            Ok(store) => (store, true),
            Err(e) => {
                // Keep whatever is on disk untouched and work in memory.
                log::error!(
                    "Task list in {} unavailable, changes will not be saved: {}",
                    config.data_directory.display(),
                    e
                );
                (storage::unsaved_task_store(config.id_scheme), false)
            }
        };

        let mut app = Self {
            core,
            config,
            cosmic_config,
            store,
            persistent,
            new_task: NewTaskDialog::new(),
            context_drawer_state: None,
        };
        app.set_header_title(fl!("app-title"));

        (app, CosmicTask::none())
    }

    fn header_end(&self) -> Vec<Element<'_, Message>> {
        let header_row = row()
            .spacing(4)
            .push(
                button::icon(icon::from_name("list-add-symbolic"))
                    .on_press(Message::OpenNewTaskDialog),
            )
            .push(
                button::icon(icon::from_name("emblem-system-symbolic"))
                    .on_press(Message::OpenSettings),
            );

        vec![header_row.into()]
    }

    fn update(&mut self, message: Message) -> CosmicTask<Message> {
        match message {
            Message::OpenNewTaskDialog => {
                self.new_task.open();
            }

            Message::CloseNewTaskDialog => {
                self.new_task.dismiss();
            }

            Message::DraftText(value) => {
                self.new_task.set_text(value);
            }

            Message::DraftDeadline(value) => {
                self.new_task.set_deadline(value);
            }

            Message::DraftLabel(value) => {
                self.new_task.set_label(value);
            }

            Message::SubmitNewTask => {
                if let Some(id) = self.new_task.submit(&mut self.store) {
                    log::info!("Created task {}", id);
                }
            }

            Message::ToggleTask(id) => {
                self.store.toggle(&id);
            }

            Message::RemoveTask(id) => {
                if self.store.remove(&id) {
                    log::info!("Deleted task {}", id);
                }
            }

            Message::OpenSettings => {
                self.context_drawer_state = Some(ContextDrawerState::Settings);
                self.core.window.show_context = true;
            }

            Message::CloseSettings => {
                self.context_drawer_state = None;
                self.core.window.show_context = false;
            }

            Message::ToggleDebugLogging => {
                self.config.debug_logging = !self.config.debug_logging;
                jasper::set_debug_logging(self.config.debug_logging);
                log::info!("Debug logging {}", if self.config.debug_logging { "on" } else { "off" });
                self.save_config();
            }
        }

        CosmicTask::none()
    }

    fn dialog(&self) -> Option<Element<'_, Message>> {
        if !self.new_task.is_open() {
            return None;
        }

        let dialog = widget::dialog()
            .title(fl!("add-new-task"))
            .control(self.new_task_form_view())
            .primary_action(
                button::suggested(fl!("add-task")).on_press(Message::SubmitNewTask),
            )
            .secondary_action(
                button::standard(fl!("cancel")).on_press(Message::CloseNewTaskDialog),
            );

        Some(dialog.into())
    }

    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Message>> {
        let drawer_state = self.context_drawer_state?;

        match drawer_state {
            ContextDrawerState::Settings => Some(
                context_drawer::context_drawer(
                    container(scrollable(
                        container(pages::settings::settings_view(&self.config, self.persistent))
                            .padding(16),
                    ))
                    .width(Length::Fill),
                    Message::CloseSettings,
                )
                .title(fl!("settings")),
            ),
        }
    }

    fn on_escape(&mut self) -> CosmicTask<Message> {
        if self.new_task.is_open() {
            self.new_task.dismiss();
        } else if self.context_drawer_state.is_some() {
            self.context_drawer_state = None;
            self.core.window.show_context = false;
        }
        CosmicTask::none()
    }

    fn subscription(&self) -> cosmic::iced::Subscription<Message> {
        cosmic::iced::event::listen_with(|event, _status, _id| {
            match event {
                cosmic::iced::Event::Keyboard(cosmic::iced::keyboard::Event::KeyPressed {
                    key: cosmic::iced::keyboard::Key::Character(ref c),
                    modifiers,
                    ..
                }) if c.as_str() == "n" && modifiers.control() => {
                    Some(Message::OpenNewTaskDialog)
                }
                _ => None,
            }
        })
    }

    fn view(&self) -> Element<'_, Message> {
        pages::tasks::tasks_view(&self.store)
    }
}

impl Jasper {
    fn new_task_form_view(&self) -> Element<'_, Message> {
        let draft = self.new_task.draft();

        column()
            .spacing(8)
            .push(text::title4(fl!("task")))
            .push(
                text_input::text_input(fl!("task-placeholder"), &draft.text)
                    .on_input(Message::DraftText)
                    .on_submit(|_| Message::SubmitNewTask)
                    .width(Length::Fill),
            )
            .push(text::title4(fl!("deadline")))
            .push(
                text_input::text_input(fl!("deadline-placeholder"), &draft.deadline)
                    .on_input(Message::DraftDeadline)
                    .width(Length::Fill),
            )
            .push(text::title4(fl!("label")))
            .push(
                text_input::text_input(fl!("label-placeholder"), &draft.label)
                    .on_input(Message::DraftLabel)
                    .on_submit(|_| Message::SubmitNewTask)
                    .width(Length::Fill),
            )
            .into()
    }

    fn save_config(&self) {
        use cosmic::cosmic_config::CosmicConfigEntry;
        if let Err(e) = self.config.write_entry(&self.cosmic_config) {
            log::error!("Failed to save config: {:?}", e);
        }
    }
}
