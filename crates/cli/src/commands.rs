//! Command implementations.
//!
//! Each command returns the text to print, or `None` when there is nothing
//! to say (for example a quiet render).

use std::path::Path;
use std::sync::Arc;

use calprint_core::calendar::{
    CalendarRequest, HolidayCatalog, TemplateGeometry, TemplateStyle, YearCalendar,
};
use calprint_render::{AssetLoader, CalendarRenderer, RenderConfig};
use chrono::NaiveDate;
use serde::Serialize;

use crate::cli::holidays::HolidaysArgs;
use crate::cli::preview::PreviewArgs;
use crate::cli::render::RenderArgs;
use crate::cli::{Cli, Commands, OutputFormat};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::{format_output, pretty};

/// What `render` reports once the document is on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSummary {
    pub path: String,
    pub file_name: String,
    pub year: i32,
    pub template: TemplateStyle,
    pub page_count: usize,
    pub is_fallback: bool,
    pub warnings: Vec<String>,
}

/// Runs the parsed command line.
pub async fn run(cli: &Cli, config: &Config) -> Result<Option<String>> {
    let catalog = Arc::new(HolidayCatalog::standard());
    let today = chrono::Local::now().date_naive();

    match &cli.command {
        Commands::Render(args) => {
            let config = config.clone().with_overrides(
                args.assets_dir.clone(),
                args.output_dir.clone(),
                args.image_dir.clone(),
            );
            let summary = render(args, &config, catalog, today).await?;
            Ok(match cli.format {
                OutputFormat::Json => Some(format_output(&summary, cli.format)),
                OutputFormat::Pretty if cli.quiet => None,
                OutputFormat::Pretty => Some(pretty::format_render_summary(&summary)),
            })
        }
        Commands::Preview(args) => preview(args, &catalog, today, cli.format).await.map(Some),
        Commands::Holidays(args) => Ok(Some(holidays(args, &catalog, cli.format))),
        Commands::Categories => Ok(Some(categories(&catalog, cli.format))),
    }
}

/// Reads and validates a request file.
pub async fn read_request(path: &Path) -> Result<CalendarRequest> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Read {
            path: path.display().to_string(),
            source,
        })?;
    let request = CalendarRequest::from_json(&json)?;
    tracing::debug!(path = %path.display(), year = request.year, "Loaded calendar request");
    Ok(request)
}

/// Reads a geometry override file. Missing fields keep their defaults.
pub async fn read_geometry(path: &Path) -> Result<TemplateGeometry> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Read {
            path: path.display().to_string(),
            source,
        })?;
    serde_json::from_str(&json).map_err(|e| CliError::Geometry {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Renders the request in `args.input` and writes the PDF to the output directory.
pub async fn render(
    args: &RenderArgs,
    config: &Config,
    catalog: Arc<HolidayCatalog>,
    today: NaiveDate,
) -> Result<RenderSummary> {
    let request = read_request(&args.input).await?;
    let render_config = match &args.geometry {
        Some(path) => RenderConfig::with_geometry(read_geometry(path).await?)?,
        None => RenderConfig::with_defaults(),
    };

    let renderer = CalendarRenderer::new(
        catalog,
        Arc::new(AssetLoader::new(&config.image_dir)),
        render_config,
    )
    .with_template_source(Arc::new(AssetLoader::new(&config.assets_dir)));

    let document = renderer.render_as_of(&request, today).await;

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(|source| CliError::Write {
            path: config.output_dir.display().to_string(),
            source,
        })?;
    let path = config.output_dir.join(&document.file_name);
    tokio::fs::write(&path, &document.bytes)
        .await
        .map_err(|source| CliError::Write {
            path: path.display().to_string(),
            source,
        })?;

    tracing::info!(
        path = %path.display(),
        pages = document.page_count,
        fallback = document.is_fallback,
        "Wrote calendar"
    );

    Ok(RenderSummary {
        path: path.display().to_string(),
        file_name: document.file_name,
        year: document.year,
        template: document.template,
        page_count: document.page_count,
        is_fallback: document.is_fallback,
        warnings: document.warnings,
    })
}

/// Resolves the request's events and formats the grid of one or all months.
pub async fn preview(
    args: &PreviewArgs,
    catalog: &HolidayCatalog,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String> {
    let request = read_request(&args.input).await?;
    let (_, unknown) = request.categories();
    for category in unknown {
        tracing::warn!(category = %category, "Ignoring unknown holiday category");
    }

    let calendar: YearCalendar = request.build_calendar(catalog, today).ok_or_else(|| {
        CliError::InvalidInput(format!("cannot build a calendar for year {}", request.year))
    })?;

    match args.month {
        Some(number) => {
            let month = (number as usize)
                .checked_sub(1)
                .and_then(|index| calendar.months.get(index))
                .ok_or_else(|| CliError::InvalidInput(format!("no month {number}")))?;
            Ok(match format {
                OutputFormat::Json => format_output(month, format),
                OutputFormat::Pretty => pretty::format_month(month),
            })
        }
        None => Ok(match format {
            OutputFormat::Json => format_output(&calendar, format),
            OutputFormat::Pretty => pretty::format_year(&calendar),
        }),
    }
}

/// Lists holidays for a year, optionally restricted to some categories.
pub fn holidays(args: &HolidaysArgs, catalog: &HolidayCatalog, format: OutputFormat) -> String {
    let events = if args.category.is_empty() {
        catalog.all_holidays(args.year)
    } else {
        catalog.holidays_for_categories(args.year, &args.category)
    };
    match format {
        OutputFormat::Json => format_output(&events, format),
        OutputFormat::Pretty => {
            pretty::format_holidays(args.year, &events, &catalog.approximate_ids())
        }
    }
}

/// Lists the catalog's categories.
pub fn categories(catalog: &HolidayCatalog, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => format_output(&catalog.categories(), format),
        OutputFormat::Pretty => pretty::format_categories(catalog.categories()),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use calprint_core::calendar::HolidayCategoryId;

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("calprint-cli-{name}-{}", std::process::id()))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    async fn write_request(dir: &Path, json: &str) -> PathBuf {
        tokio::fs::create_dir_all(dir).await.unwrap();
        let path = dir.join("request.json");
        tokio::fs::write(&path, json).await.unwrap();
        path
    }

    const REQUEST: &str = r#"{
        "name": "Asha Rao",
        "birthdate": "1990-11-14",
        "anniversary": "",
        "additionalDates": "2024-12-25 - Christmas",
        "year": 2026,
        "images": {},
        "enabledHolidayCategories": ["indian-national"]
    }"#;

    #[test]
    fn test_holidays_filters_by_category() {
        let catalog = HolidayCatalog::standard();
        let args = HolidaysArgs {
            year: 2026,
            category: vec![HolidayCategoryId::ChristianFestivals],
        };

        let json = holidays(&args, &catalog, OutputFormat::Json);
        let events: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();

        assert!(!events.is_empty());
        assert!(events.iter().all(|e| e["category"] == "christian-festivals"));
        assert!(events.iter().any(|e| e["date"] == "2026-12-25"));
    }

    #[test]
    fn test_holidays_without_categories_lists_everything() {
        let catalog = HolidayCatalog::standard();
        let args = HolidaysArgs {
            year: 2026,
            category: vec![],
        };

        let output = holidays(&args, &catalog, OutputFormat::Pretty);
        assert!(output.starts_with(&format!(
            "HOLIDAYS 2026 ({})",
            catalog.all_holidays(2026).len()
        )));
        assert!(output.contains("(approx.)"));
    }

    #[test]
    fn test_categories_json() {
        let catalog = HolidayCatalog::standard();
        let json = categories(&catalog, OutputFormat::Json);
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.len(), 8);
        assert_eq!(parsed[0]["id"], "indian-national");
        assert_eq!(parsed[0]["enabledByDefault"], true);
    }

    #[tokio::test]
    async fn test_preview_single_month() {
        let dir = scratch_dir("preview");
        let input = write_request(&dir, REQUEST).await;
        let catalog = HolidayCatalog::standard();

        let args = PreviewArgs {
            input,
            month: Some(11),
        };
        let output = preview(&args, &catalog, today(), OutputFormat::Pretty)
            .await
            .unwrap();

        assert!(output.starts_with("November 2026"));
        assert!(output.contains("Birthday [birthday]"));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_preview_rejects_bad_request() {
        let dir = scratch_dir("preview-bad");
        let input = write_request(&dir, r#"{"year": 0}"#).await;
        let catalog = HolidayCatalog::standard();

        let args = PreviewArgs { input, month: None };
        let result = preview(&args, &catalog, today(), OutputFormat::Json).await;
        assert!(matches!(result, Err(CliError::Request(_))));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_preview_rejects_month_zero() {
        let dir = scratch_dir("preview-zero");
        let input = write_request(&dir, REQUEST).await;
        let catalog = HolidayCatalog::standard();

        let args = PreviewArgs {
            input,
            month: Some(0),
        };
        let result = preview(&args, &catalog, today(), OutputFormat::Pretty).await;
        assert!(matches!(result, Err(CliError::InvalidInput(msg)) if msg == "no month 0"));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_read_request_missing_file() {
        let result = read_request(Path::new("/nonexistent/calprint/request.json")).await;
        assert!(matches!(result, Err(CliError::Read { .. })));
    }

    #[tokio::test]
    async fn test_render_without_artwork_writes_fallback() {
        let dir = scratch_dir("render");
        let input = write_request(&dir, REQUEST).await;
        let config = Config {
            assets_dir: dir.join("no-assets"),
            output_dir: dir.join("out"),
            image_dir: dir.clone(),
            log_json: false,
        };
        let args = RenderArgs {
            input,
            output_dir: None,
            assets_dir: None,
            image_dir: None,
            geometry: None,
        };

        let summary = render(&args, &config, Arc::new(HolidayCatalog::standard()), today())
            .await
            .unwrap();

        assert!(summary.is_fallback);
        assert_eq!(summary.file_name, "Asha_Rao_Calendar_2026.pdf");
        let bytes = tokio::fs::read(dir.join("out").join("Asha_Rao_Calendar_2026.pdf"))
            .await
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-"));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_render_keeps_path_characters_out_of_file_name() {
        let dir = scratch_dir("render-slash");
        let input = write_request(&dir, r#"{"name": "AC/DC ../x", "year": 2026}"#).await;
        let config = Config {
            assets_dir: dir.join("no-assets"),
            output_dir: dir.join("out"),
            image_dir: dir.clone(),
            log_json: false,
        };
        let args = RenderArgs {
            input,
            output_dir: None,
            assets_dir: None,
            image_dir: None,
            geometry: None,
        };

        let summary = render(&args, &config, Arc::new(HolidayCatalog::standard()), today())
            .await
            .unwrap();

        assert_eq!(summary.file_name, "AC_DC____x_Calendar_2026.pdf");
        let written = dir.join("out").join(&summary.file_name);
        assert_eq!(PathBuf::from(&summary.path), written);
        assert!(tokio::fs::read(&written).await.unwrap().starts_with(b"%PDF-"));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_read_geometry_overrides_fields() {
        let dir = scratch_dir("geometry");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("geometry.json");
        tokio::fs::write(&path, r#"{"gridTop": 140.5, "rows": 6}"#)
            .await
            .unwrap();

        let geometry = read_geometry(&path).await.unwrap();
        assert_eq!(geometry.grid_top, 140.5);
        assert_eq!(geometry.rows, 6);
        assert_eq!(geometry.cell_width, TemplateGeometry::default().cell_width);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
