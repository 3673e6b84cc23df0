pub(crate) const BANNER: &str = "###### HACKER NEWS TOP 10 STORIES #####";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Renders one item as `<local time> <title>(<score>)`.
pub(crate) fn format_item_line(item: &crate::item::Item) -> String {
    format!("{} {}({})", format_local_time(item.time), item.title, item.score)
}

fn format_local_time(epoch_secs: i64) -> String {
    match chrono::DateTime::from_timestamp(epoch_secs, 0) {
        Some(utc) => utc
            .with_timezone(&chrono::Local)
            .format(TIME_FORMAT)
            .to_string(),
        // Outside of chrono's range, nothing sensible to convert.
        None => format!("@{epoch_secs}"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Timing {
    pub(crate) elapsed: std::time::Duration,
    pub(crate) throttled_items: u32,
    pub(crate) delay: std::time::Duration,
}

impl Timing {
    pub(crate) fn throttle(&self) -> std::time::Duration {
        self.delay * self.throttled_items
    }

    /// Wall clock time minus the time spent sleeping between items.
    pub(crate) fn net(&self) -> std::time::Duration {
        self.elapsed.saturating_sub(self.throttle())
    }

    pub(crate) fn summary_line(&self) -> String {
        format!(
            "Process time: {:?} (- {:?} of delay time)",
            self.net(),
            self.throttle()
        )
    }
}

pub(crate) fn write_banner(out: &mut impl std::io::Write) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{BANNER}")?;
    writeln!(out)
}

pub(crate) fn write_item(
    out: &mut impl std::io::Write,
    item: &crate::item::Item,
) -> std::io::Result<()> {
    writeln!(out, "{}", format_item_line(item))?;
    out.flush()
}

pub(crate) fn write_summary(out: &mut impl std::io::Write, timing: &Timing) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", timing.summary_line())?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_story_without_url() {
        let item: crate::item::Item =
            serde_json::from_str(r#"{"by":"x","id":42,"score":7,"title":"Hello","time":0}"#)
                .unwrap();

        let line = format_item_line(&item);

        let epoch = chrono::DateTime::from_timestamp(0, 0)
            .unwrap()
            .with_timezone(&chrono::Local)
            .format(TIME_FORMAT)
            .to_string();
        assert_eq!(line, format!("{epoch} Hello(7)"));
        assert!(line.starts_with("1970-01-01") || line.starts_with("1969-12-31"));
        assert!(line.ends_with("Hello(7)"));
    }

    #[test]
    fn test_local_time_ends_with_numeric_offset() {
        let rendered = format_local_time(1175714200);

        let (_, offset) = rendered.rsplit_once(' ').unwrap();
        assert_eq!(offset.len(), 5);
        assert!(offset.starts_with('+') || offset.starts_with('-'));
        assert!(offset[1..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_format_out_of_range_time() {
        let item = crate::item::Item {
            title: "Far future".to_string(),
            score: 1,
            time: i64::MAX,
            ..Default::default()
        };

        assert_eq!(
            format_item_line(&item),
            format!("@{} Far future(1)", i64::MAX)
        );
    }

    #[test]
    fn test_net_subtracts_exactly_the_throttle() {
        let timing = Timing {
            elapsed: Duration::from_millis(1234),
            throttled_items: 10,
            delay: Duration::from_millis(10),
        };

        assert_eq!(timing.throttle(), Duration::from_millis(100));
        assert_eq!(timing.net(), Duration::from_millis(1134));
        assert_eq!(timing.net() + timing.throttle(), timing.elapsed);
    }

    #[test]
    fn test_net_never_underflows() {
        let timing = Timing {
            elapsed: Duration::from_millis(50),
            throttled_items: 10,
            delay: Duration::from_millis(10),
        };

        assert_eq!(timing.net(), Duration::ZERO);
    }

    #[test]
    fn test_summary_line() {
        let timing = Timing {
            elapsed: Duration::from_millis(600),
            throttled_items: 10,
            delay: Duration::from_millis(10),
        };

        assert_eq!(
            timing.summary_line(),
            "Process time: 500ms (- 100ms of delay time)"
        );
    }

    #[test]
    fn test_write_summary_layout() {
        let timing = Timing {
            elapsed: Duration::from_millis(100),
            throttled_items: 10,
            delay: Duration::from_millis(10),
        };
        let mut out = Vec::new();

        write_summary(&mut out, &timing).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nProcess time: 0ns (- 100ms of delay time)\n\n"
        );
    }
}
