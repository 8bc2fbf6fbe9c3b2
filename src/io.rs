use crate::model::CalendarYear;
use anyhow::Context;
use csv::WriterBuilder;
use std::path::Path;

/// Export CSV: header `date,category`, une ligne par date listée (ISO `YYYY-MM-DD`).
pub fn export_calendar_csv<P: AsRef<Path>>(path: P, calendar: &CalendarYear) -> anyhow::Result<()> {
    let path = path.as_ref();
    let mut w = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    w.write_record(["date", "category"])?;
    for (category, days) in calendar.categories() {
        for md in days {
            let date = md
                .in_year(calendar.year())
                .with_context(|| format!("{md} is not a date of {}", calendar.year()))?;
            let date = date.format("%Y-%m-%d").to_string();
            w.write_record([date.as_str(), category])?;
        }
    }
    w.flush()?;
    Ok(())
}
