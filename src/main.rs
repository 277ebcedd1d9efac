use cosmic::app::Settings;
use cosmic::cosmic_config::CosmicConfigEntry;
use cosmic::iced::Limits;

mod application;
mod components;
mod localize;
mod message;
mod pages;

use jasper::config;

use application::{Flags, Jasper};
use config::{APP_ID, CONFIG_VERSION, JasperConfig};

/// Filters journal output: jasper targets at info/debug (per config), everything else at warn.
struct FilteredJournal {
    inner: systemd_journal_logger::JournalLog,
}

impl log::Log for FilteredJournal {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        if metadata.target().starts_with("jasper") {
            let max = if jasper::debug_logging() { log::LevelFilter::Debug } else { log::LevelFilter::Info };
            metadata.level() <= max
        } else {
            metadata.level() <= log::LevelFilter::Warn
        }
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            self.inner.log(record);
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cosmic_cfg = cosmic::cosmic_config::Config::new(APP_ID, CONFIG_VERSION)?;
    let config = JasperConfig::get_entry(&cosmic_cfg).unwrap_or_else(|(_, cfg)| cfg);

    // Log to the systemd user journal (`journalctl --user -t jasper -f`).
    jasper::set_debug_logging(config.debug_logging);
    match systemd_journal_logger::JournalLog::new() {
        Ok(journal) => {
            let journal = journal.with_syslog_identifier("jasper".to_string());
            log::set_boxed_logger(Box::new(FilteredJournal { inner: journal }))?;
            // Global max must be Debug so jasper debug logs can pass through when toggled
            log::set_max_level(log::LevelFilter::Debug);
        }
        Err(e) => eprintln!("journal logging unavailable: {}", e),
    }

    localize::localize();

    let settings = Settings::default().size_limits(Limits::NONE.min_width(360.0).min_height(400.0));

    let flags = Flags { config, cosmic_config: cosmic_cfg };
    cosmic::app::run::<Jasper>(settings, flags)?;

    Ok(())
}
