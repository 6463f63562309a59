use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::acquire::{self, PageFetcher};
use crate::analyzer::analyze;
use crate::error::Result;
use crate::labels::MenuLabelRecord;

/// Batch input: display names (underscores for spaces) mapped to menu URLs.
#[derive(Debug, Deserialize)]
pub struct RestaurantList {
    #[serde(rename = "Restaurants", default)]
    pub restaurants: serde_json::Map<String, serde_json::Value>,
}

/// Collects label records across sources.
#[derive(Debug)]
pub struct MenuPipeline {
    fetcher: PageFetcher,
    results: Vec<MenuLabelRecord>,
}

impl MenuPipeline {
    pub fn new(fetcher: PageFetcher) -> Self {
        Self {
            fetcher,
            results: Vec::new(),
        }
    }

    pub fn results(&self) -> &[MenuLabelRecord] {
        &self.results
    }

    pub fn into_results(self) -> Vec<MenuLabelRecord> {
        self.results
    }

    pub fn process_text(&mut self, text: &str, name: &str, source: &str) -> &MenuLabelRecord {
        let record = analyze(text, name).with_source(source);
        self.results.push(record);
        &self.results[self.results.len() - 1]
    }

    pub async fn process_pdf(&mut self, path: &Path) -> Result<&MenuLabelRecord> {
        info!("Processing PDF: {}", path.display());
        let text = acquire::pdf_text_from_path(path).await?;
        // File names are too unreliable to serve as restaurant names.
        Ok(self.process_text(&text, "", &path.display().to_string()))
    }

    pub async fn process_url(&mut self, url: &str, name: &str) -> Result<&MenuLabelRecord> {
        info!("Processing URL: {url}");
        let text = self.fetcher.fetch_text(url).await?;
        Ok(self.process_text(&text, name, url))
    }

    /// Every `.pdf` file directly inside `dir`, in file name order. Files that
    /// fail to load are logged and skipped.
    pub async fn process_pdfs_directory(&mut self, dir: &Path) -> Result<usize> {
        let mut pdfs: Vec<PathBuf> = Vec::new();
        let mut entries = tokio::fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_pdf = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
            if is_pdf && tokio::fs::metadata(&path).await.is_ok_and(|m| m.is_file()) {
                pdfs.push(path);
            }
        }
        pdfs.sort();

        let mut ok = 0;
        for pdf in &pdfs {
            match self.process_pdf(pdf).await {
                Ok(_) => {
                    info!("  ✓ Success");
                    ok += 1;
                }
                Err(e) => warn!("  ✗ Error for {}: {}", pdf.display(), e),
            }
        }
        info!("Processed {} PDFs ({} ok, {} errors)", pdfs.len(), ok, pdfs.len() - ok);
        Ok(ok)
    }

    pub async fn process_restaurants_json(&mut self, path: &Path) -> Result<usize> {
        let content = tokio::fs::read_to_string(path).await?;
        let list: RestaurantList = serde_json::from_str(&content)?;

        let mut ok = 0;
        for (name, url) in &list.restaurants {
            let Some(url) = url.as_str() else {
                warn!("  ✗ Error for {name}: URL is not a string");
                continue;
            };
            match self.process_url(url, &name.replace('_', " ")).await {
                Ok(_) => {
                    info!("  ✓ Success");
                    ok += 1;
                }
                Err(e) => warn!("  ✗ Error for {name}: {e}"),
            }
        }
        Ok(ok)
    }

    pub fn summary(&self) -> Option<Summary> {
        Summary::from_records(&self.results)
    }
}

/// How many menus carry each label.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub regional_seasonal: usize,
    pub multi_course_menu: usize,
    pub small_menu: usize,
    pub large_menu: usize,
    pub vegan_options: usize,
    pub vegetarian_options: usize,
    pub gluten_free_options: usize,
    pub average_price: f64,
}

impl Summary {
    pub fn from_records(records: &[MenuLabelRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let count = |pick: fn(&MenuLabelRecord) -> bool| records.iter().filter(|&r| pick(r)).count();
        let total_price: f64 = records.iter().map(|r| r.average_price).sum();

        Some(Self {
            total: records.len(),
            regional_seasonal: count(|r| r.regional_seasonal.is_yes()),
            multi_course_menu: count(|r| r.multi_course_menu.is_yes()),
            small_menu: count(|r| r.small_menu.is_yes()),
            large_menu: count(|r| r.large_menu.is_yes()),
            vegan_options: count(|r| r.vegan_options.is_yes()),
            vegetarian_options: count(|r| r.vegetarian_options.is_yes()),
            gluten_free_options: count(|r| r.gluten_free_options.is_yes()),
            average_price: total_price / records.len() as f64,
        })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(70);
        writeln!(f, "{rule}")?;
        writeln!(f, "MENU LABELING SUMMARY")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Total restaurants analyzed: {}", self.total)?;
        writeln!(f)?;
        writeln!(f, "Regional & Seasonal: {}", self.regional_seasonal)?;
        writeln!(f, "Multi-course menus: {}", self.multi_course_menu)?;
        writeln!(f, "Small menus (≤4 mains): {}", self.small_menu)?;
        writeln!(f, "Large menus (>20 mains): {}", self.large_menu)?;
        writeln!(f, "With vegan options (≥30%): {}", self.vegan_options)?;
        writeln!(f, "With vegetarian options (≥30%): {}", self.vegetarian_options)?;
        writeln!(f, "With gluten-free options (≥2): {}", self.gluten_free_options)?;
        writeln!(f)?;
        write!(f, "Average price across all: {:.2} CHF", self.average_price)
    }
}
