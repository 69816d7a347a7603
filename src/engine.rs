use crate::{
    catalog::{Catalog, load_catalog},
    config::ReportConfig,
    models::ExchangeRate,
    rates::{RateTable, load_rates},
    traits::{AuthorSource, LineWrite},
};
use anyhow::Result;

/// Runs every report in turn and writes the console output to `writer`.
pub struct Engine<T, A> {
    writer: T,
    author_source: A,
    config: ReportConfig,
}

impl<T, A> Engine<T, A>
where
    T: LineWrite,
    A: AuthorSource,
{
    pub fn new(writer: T, author_source: A, config: ReportConfig) -> Self {
        Self {
            writer,
            author_source,
            config,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let rates = load_rates(&self.config.rates_path)?;
        self.report_rates(&rates)?;

        let catalog = load_catalog(
            &self.config.catalog_path,
            self.config.encoding,
            self.config.delimiter,
        )?;
        self.run_catalog_reports(&catalog)?;

        self.writer.flush()
    }

    fn report_rates(&mut self, rates: &RateTable) -> Result<()> {
        if rates.is_empty() {
            log::warn!("No exchange rates found in {:?}", self.config.rates_path);
        }

        self.writer.write_line("Exchange rates:")?;
        if self.config.currencies.is_empty() {
            for rate in rates.iter() {
                self.write_rate(rate)?;
            }
            return Ok(());
        }

        for code in &self.config.currencies.clone() {
            match rates.get(code) {
                Some(rate) => self.write_rate(rate)?,
                None => self.writer.write_line(&format!("{code}: not found"))?,
            }
        }
        Ok(())
    }

    fn write_rate(&mut self, rate: &ExchangeRate) -> Result<()> {
        let shown = match rate.rate() {
            Ok(value) => value.to_string(),
            Err(e) => {
                log::warn!("{e}");
                rate.value().trim().to_string()
            }
        };
        self.writer
            .write_line(&format!("{}: {}", rate.code().trim(), shown))
    }

    fn run_catalog_reports(&mut self, catalog: &Catalog) -> Result<()> {
        if catalog.is_empty() {
            log::warn!("Catalog {:?} has no rows", self.config.catalog_path);
        }

        let threshold = self.config.title_threshold;
        let long_titles = catalog.titles_longer_than(threshold);
        self.writer.write_line("")?;
        self.writer.write_line(&format!(
            "Books with a title longer than {threshold} characters: {long_titles}"
        ))?;

        let author = self.author_source.author()?;
        log::debug!("Looking up books by {author:?}");
        let books = catalog.find_books_by_author(&author);
        self.writer.write_line("")?;
        if books.is_empty() {
            self.writer
                .write_line(&format!("No books by {author} found."))?;
        } else {
            self.writer.write_line(&format!("Books by {author}:"))?;
            for book in books {
                self.writer.write_line(&format!(
                    "- {} ({})",
                    book.title(),
                    book.year_of_publication()
                ))?;
            }
        }

        let bibliography =
            catalog.generate_bibliography(self.config.bibliography_size, &self.config.output_path)?;
        if bibliography.is_empty() {
            log::warn!("Bibliography is empty");
        }
        for entry in bibliography.entries() {
            log::debug!("Bibliography entry: {entry}");
        }
        self.writer.write_line("")?;
        self.writer.write_line(&format!(
            "Bibliography of {} references saved to {}",
            bibliography.len(),
            self.config.output_path.display()
        ))?;

        let publishers = catalog.list_publishers();
        self.writer.write_line("")?;
        self.writer
            .write_line(&format!("Distinct publishers: {}", publishers.len()))?;

        self.writer.write_line("")?;
        self.writer.write_line("Top 20 books:")?;
        for (index, top) in catalog.top_20_books().iter().enumerate() {
            self.writer.write_line(&format!(
                "{}. {}: {} occurrence(s)",
                index + 1,
                top.title(),
                top.count()
            ))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::ReportError, prompt::FixedAuthor};
    use encoding_rs::WINDOWS_1251;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    struct MockLineWriter {
        lines: Vec<String>,
    }

    impl LineWrite for &mut MockLineWriter {
        fn write_line(&mut self, line: &str) -> Result<()> {
            self.lines.push(line.to_string());
            Ok(())
        }
    }

    const CATALOG: &str = "ISBN;Book-Title;Book-Author;Year-Of-Publication;Publisher\n\
        1;Poirot;Christie;1920;B\n\
        2;Poirot;Christie;1920;A\n\
        3;Sherlock;Doyle;1890;B\n\
        4;Собака Баскервилей и другие повести;Doyle;1902;Эксмо\n";

    const RATES: &str = "<ValCurs>\
        <Valute><CharCode>USD</CharCode><Value>91,3336</Value></Valute>\
        <Valute><CharCode>XYZ</CharCode><Value>n/a</Value></Valute>\
        </ValCurs>";

    fn config_in(dir: &Path) -> Result<ReportConfig> {
        let catalog_path = dir.join("books.csv");
        let (bytes, _, _) = WINDOWS_1251.encode(CATALOG);
        fs::write(&catalog_path, &bytes)?;
        let rates_path = dir.join("currency.xml");
        fs::write(&rates_path, RATES)?;

        Ok(ReportConfig {
            catalog_path,
            rates_path,
            output_path: dir.join("result.txt"),
            currencies: Vec::new(),
            encoding: WINDOWS_1251,
            delimiter: b';',
            title_threshold: 30,
            bibliography_size: 20,
        })
    }

    #[test]
    fn test_run_writes_every_report() -> Result<()> {
        let dir = TempDir::new()?;
        let config = config_in(dir.path())?;
        let output_path = config.output_path.clone();
        let mut writer = MockLineWriter { lines: Vec::new() };

        Engine::new(&mut writer, FixedAuthor("CHRISTIE".to_string()), config).run()?;

        let lines = &writer.lines;
        assert_eq!(lines[0], "Exchange rates:");
        assert_eq!(lines[1], "USD: 91.3336");
        assert_eq!(lines[2], "XYZ: n/a");
        assert!(lines.contains(&"Books with a title longer than 30 characters: 1".to_string()));
        assert!(lines.contains(&"Books by CHRISTIE:".to_string()));
        assert_eq!(lines.iter().filter(|l| *l == "- Poirot (1920)").count(), 2);
        assert!(lines.contains(&"Distinct publishers: 3".to_string()));
        assert!(lines.contains(&"1. Poirot: 2 occurrence(s)".to_string()));
        assert!(lines.contains(&"2. Sherlock: 1 occurrence(s)".to_string()));

        let bibliography = fs::read_to_string(output_path)?;
        assert_eq!(
            bibliography.lines().collect::<Vec<_>>(),
            vec![
                "1. Christie. Poirot - 1920",
                "2. Christie. Poirot - 1920",
                "3. Doyle. Sherlock - 1890",
                "4. Doyle. Собака Баскервилей и другие повести - 1902",
            ]
        );
        Ok(())
    }

    #[test]
    fn test_run_shows_only_requested_currencies() -> Result<()> {
        let dir = TempDir::new()?;
        let mut config = config_in(dir.path())?;
        config.currencies = vec!["usd".to_string(), "GBP".to_string()];
        let mut writer = MockLineWriter { lines: Vec::new() };

        Engine::new(&mut writer, FixedAuthor("Doyle".to_string()), config).run()?;

        assert_eq!(
            writer.lines[..3],
            ["Exchange rates:", "USD: 91.3336", "GBP: not found"]
        );
        assert!(!writer.lines.iter().any(|l| l.starts_with("XYZ")));
        Ok(())
    }

    #[test]
    fn test_run_reports_unknown_author() -> Result<()> {
        let dir = TempDir::new()?;
        let config = config_in(dir.path())?;
        let mut writer = MockLineWriter { lines: Vec::new() };

        Engine::new(&mut writer, FixedAuthor("Tolstoy".to_string()), config).run()?;

        assert!(writer.lines.contains(&"No books by Tolstoy found.".to_string()));
        Ok(())
    }

    #[test]
    fn test_missing_rates_file_aborts_before_any_report() -> Result<()> {
        let dir = TempDir::new()?;
        let mut config = config_in(dir.path())?;
        config.rates_path = dir.path().join("absent.xml");
        let output_path = config.output_path.clone();
        let mut writer = MockLineWriter { lines: Vec::new() };

        let err = Engine::new(&mut writer, FixedAuthor("Doyle".to_string()), config)
            .run()
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::Io { .. })
        ));
        assert!(writer.lines.is_empty());
        assert!(!output_path.exists());
        Ok(())
    }
}
