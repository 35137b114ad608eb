use log::{Level, LevelFilter, Log, Metadata, Record, set_logger, set_max_level};

pub struct Logger;

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let color = match record.level() {
            Level::Error => 31, // Red
            Level::Warn => 93,  // BrightYellow
            Level::Info => 37,  // White
            Level::Debug => 32, // Green
            Level::Trace => 90, // BrightBlack
        };
        println!(
            "\u{1B}[{}m[{:}] {}\u{1B}[0m",
            color,
            record.level(),
            record.args(),
        );
    }

    fn flush(&self) {}
}

/// Map a `LOG_LEVEL` flag (0 = off .. 5 = trace) to a filter. Larger values mean trace.
pub fn level_filter(level: usize) -> LevelFilter {
    match level {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn init() {
    static LOGGER: Logger = Logger;
    set_logger(&LOGGER).unwrap_or_else(|err| panic!("Error initializing logger: {:?}", err));
    set_max_level(level_filter(config::build_flags::LOG_LEVEL));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_flags_map_to_filters() {
        assert_eq!(level_filter(0), LevelFilter::Off);
        assert_eq!(level_filter(3), LevelFilter::Info);
        assert_eq!(level_filter(5), LevelFilter::Trace);
        assert_eq!(level_filter(42), LevelFilter::Trace);
    }
}
