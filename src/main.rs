// Image Optimizer for Web - pick images, pick a folder, shrink them
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use iced::font::{Family, Weight};
use iced::widget::{button, column, container, pick_list, row, scrollable, slider, text, text_input, Space};
use iced::{executor, Application, Command, Element, Font, Length, Settings, Theme};
use image_web_optimizer::input::{collect_images, IMAGE_EXTENSIONS};
use image_web_optimizer::{
    format_bytes, BatchReport, Optimizer, OptimizerConfig, OutputFormat, DEFAULT_MIN_DIMENSION,
    DEFAULT_QUALITY,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const HEADING_FONT: Font = Font {
    family: Family::SansSerif,
    weight: Weight::Bold,
    stretch: iced::font::Stretch::Normal,
    monospaced: false,
};

const BODY_FONT: Font = Font {
    family: Family::SansSerif,
    weight: Weight::Normal,
    stretch: iced::font::Stretch::Normal,
    monospaced: false,
};

const TITLE: &str = "Image Optimizer for Web";

static FORMATS: [OutputFormat; 3] = OutputFormat::ALL;

pub fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("image_web_optimizer=info")),
        )
        .init();

    ImageOptimizerApp::run(Settings {
        window: iced::window::Settings {
            size: (480, 560),
            min_size: Some((420, 480)),
            resizable: true,
            decorations: true,
            ..Default::default()
        },
        default_font: BODY_FONT,
        default_text_size: 14.0,
        ..Default::default()
    })
}

struct ImageOptimizerApp {
    selected_paths: Vec<PathBuf>,
    destination: Option<PathBuf>,
    min_dimension: String,
    quality: u8,
    format: OutputFormat,
    is_processing: bool,
    status_message: String,
    report: Option<BatchReport>,
}

impl Default for ImageOptimizerApp {
    fn default() -> Self {
        Self {
            selected_paths: Vec::new(),
            destination: None,
            min_dimension: DEFAULT_MIN_DIMENSION.to_string(),
            quality: DEFAULT_QUALITY,
            format: OutputFormat::default(),
            is_processing: false,
            status_message: String::new(),
            report: None,
        }
    }
}

#[derive(Debug, Clone)]
enum Message {
    SelectFiles,
    AddFolder,
    FilesSelected(Vec<PathBuf>),
    SelectDestination,
    DestinationSelected(Option<PathBuf>),
    MinDimensionChanged(String),
    QualityChanged(u8),
    FormatSelected(OutputFormat),
    Optimize,
    OptimizationFinished(Result<BatchReport, String>),
    OpenDestination,
}

impl Application for ImageOptimizerApp {
    type Message = Message;
    type Theme = Theme;
    type Executor = executor::Default;
    type Flags = ();

    fn new(_flags: ()) -> (Self, Command<Message>) {
        (Self::default(), Command::none())
    }

    fn title(&self) -> String {
        String::from(TITLE)
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::SelectFiles => {
                return Command::perform(select_files(), Message::FilesSelected);
            }
            Message::AddFolder => {
                return Command::perform(select_image_folder(), Message::FilesSelected);
            }
            Message::FilesSelected(paths) => {
                // a cancelled dialog keeps the previous selection
                if !paths.is_empty() {
                    self.selected_paths = paths;
                }
            }
            Message::SelectDestination => {
                return Command::perform(select_folder(), Message::DestinationSelected);
            }
            Message::DestinationSelected(path) => {
                if path.is_some() {
                    self.destination = path;
                }
            }
            Message::MinDimensionChanged(value) => {
                if is_numeric_input(&value) {
                    self.min_dimension = value;
                }
            }
            Message::QualityChanged(quality) => {
                self.quality = quality;
            }
            Message::FormatSelected(format) => {
                self.format = format;
            }
            Message::Optimize => match self.check_requirements() {
                Ok(config) => {
                    self.is_processing = true;
                    self.report = None;
                    self.status_message = String::from("Optimizing...");
                    return Command::perform(
                        run_batch(self.selected_paths.clone(), config),
                        Message::OptimizationFinished,
                    );
                }
                Err(reason) => {
                    self.status_message = reason.to_string();
                }
            },
            Message::OptimizationFinished(result) => {
                self.is_processing = false;
                match result {
                    Ok(report) => {
                        self.status_message = report.summary();
                        self.report = Some(report);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "batch failed");
                        self.status_message = e;
                    }
                }
            }
            Message::OpenDestination => {
                if let Some(destination) = &self.destination {
                    if let Err(e) = open::that(destination) {
                        tracing::warn!(error = %e, "could not open destination");
                    }
                }
            }
        }
        Command::none()
    }

    fn view(&self) -> Element<Message> {
        let title = text(TITLE).size(22).font(HEADING_FONT);

        let images = column![
            text("Images").size(16).font(HEADING_FONT),
            row![
                button("Select Files").on_press(Message::SelectFiles).padding([6, 12]),
                button("Add Folder").on_press(Message::AddFolder).padding([6, 12]),
            ]
            .spacing(8),
            text(selection_summary(self.selected_paths.len())).size(12).font(BODY_FONT),
        ]
        .spacing(8);

        let destination = column![
            text("Finished Directory").size(16).font(HEADING_FONT),
            button("Select Folder").on_press(Message::SelectDestination).padding([6, 12]),
            text(match &self.destination {
                Some(path) => truncate_path(path),
                None => String::from("No directory selected"),
            })
            .size(12)
            .font(BODY_FONT),
        ]
        .spacing(8);

        let settings = column![
            text("Settings").size(16).font(HEADING_FONT),
            row![
                text("Minimum px:").size(13).font(BODY_FONT).width(90),
                text_input("600", &self.min_dimension)
                    .on_input(Message::MinDimensionChanged)
                    .width(Length::Fixed(80.0))
                    .padding(4)
                    .size(13),
            ]
            .spacing(8),
            row![
                text("Format:").size(13).font(BODY_FONT).width(90),
                pick_list(&FORMATS[..], Some(self.format), Message::FormatSelected),
            ]
            .spacing(8),
            text(self.format.description()).size(12).font(BODY_FONT),
            if self.format.supports_quality() {
                row![
                    text("Quality:").size(13).font(BODY_FONT).width(90),
                    slider(0..=100, self.quality, Message::QualityChanged).width(Length::Fill),
                    text(format!("{}", self.quality)).size(13).font(BODY_FONT).width(40),
                ]
                .spacing(8)
            } else {
                row![]
            },
        ]
        .spacing(8);

        let optimize_button = if self.is_processing {
            button("Optimizing...").padding([8, 16])
        } else {
            button("Start Optimization")
                .on_press(Message::Optimize)
                .padding([8, 16])
        };

        let status = text(&self.status_message).size(13).font(BODY_FONT);

        let results_section = match &self.report {
            Some(report) => {
                let results_list: Vec<Element<Message>> = report
                    .outcomes
                    .iter()
                    .map(|outcome| {
                        let (width, height) = outcome.new_dimensions;
                        row![
                            text(outcome.filename()).size(12).font(BODY_FONT).width(Length::Fill),
                            text(format!(
                                "{} → {} ({}×{})",
                                format_bytes(outcome.original_size),
                                format_bytes(outcome.new_size),
                                width,
                                height,
                            ))
                            .size(12)
                            .font(BODY_FONT),
                        ]
                        .spacing(8)
                        .into()
                    })
                    .collect();

                column![
                    text("Results").size(16).font(HEADING_FONT),
                    container(scrollable(column(results_list).spacing(3)).height(Length::Fixed(100.0)))
                        .style(iced::theme::Container::Box)
                        .padding(8),
                    text(format!(
                        "Total: {} → {}",
                        format_bytes(report.bytes_before),
                        format_bytes(report.bytes_after),
                    ))
                    .size(12)
                    .font(BODY_FONT),
                    button("Open Output")
                        .on_press(Message::OpenDestination)
                        .padding([6, 12]),
                ]
                .spacing(8)
            }
            None => column![],
        };

        let content = column![
            title,
            Space::with_height(12),
            images,
            Space::with_height(12),
            destination,
            Space::with_height(12),
            settings,
            Space::with_height(12),
            optimize_button,
            Space::with_height(8),
            status,
            Space::with_height(12),
            results_section,
        ]
        .padding(16);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}

impl ImageOptimizerApp {
    fn check_requirements(&self) -> Result<OptimizerConfig, &'static str> {
        if self.selected_paths.is_empty() {
            return Err("No images selected");
        }
        let Some(destination) = &self.destination else {
            return Err("No directory selected");
        };
        let min_dimension = self.min_dimension.parse::<u32>().unwrap_or(0);
        if min_dimension == 0 {
            return Err("Minimum dimension must be greater than 0");
        }

        Ok(OptimizerConfig::new(destination, min_dimension)
            .with_quality(self.quality)
            .with_format(self.format))
    }
}

// Helper functions
fn selection_summary(count: usize) -> String {
    match count {
        0 => String::from("No files selected"),
        1 => String::from("1 file selected"),
        n => format!("{} files selected", n),
    }
}

fn is_numeric_input(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}

fn truncate_path(path: &std::path::Path) -> String {
    let display_path = path.display().to_string();
    let chars: Vec<char> = display_path.chars().collect();
    if chars.len() > 60 {
        format!("...{}", chars[chars.len() - 57..].iter().collect::<String>())
    } else {
        display_path
    }
}

async fn select_files() -> Vec<PathBuf> {
    rfd::AsyncFileDialog::new()
        .add_filter("Image Files", &IMAGE_EXTENSIONS)
        .pick_files()
        .await
        .map(|handles| handles.iter().map(|h| h.path().to_path_buf()).collect())
        .unwrap_or_default()
}

async fn select_folder() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .pick_folder()
        .await
        .map(|handle| handle.path().to_path_buf())
}

async fn select_image_folder() -> Vec<PathBuf> {
    match select_folder().await {
        Some(dir) => tokio::task::spawn_blocking(move || collect_images(&dir))
            .await
            .unwrap_or_default(),
        None => Vec::new(),
    }
}

async fn run_batch(paths: Vec<PathBuf>, config: OptimizerConfig) -> Result<BatchReport, String> {
    tokio::task::spawn_blocking(move || {
        Optimizer::new(config)
            .optimize(&paths)
            .map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| e.to_string())?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_label() {
        assert_eq!(selection_summary(0), "No files selected");
        assert_eq!(selection_summary(1), "1 file selected");
        assert_eq!(selection_summary(12), "12 files selected");
    }

    #[test]
    fn min_dimension_field_accepts_digits_only() {
        assert!(is_numeric_input(""));
        assert!(is_numeric_input("700"));
        assert!(!is_numeric_input("70a"));
        assert!(!is_numeric_input("-5"));
    }

    #[test]
    fn requirements_are_checked_in_order() {
        let mut app = ImageOptimizerApp::default();
        assert_eq!(app.check_requirements().unwrap_err(), "No images selected");

        app.selected_paths = vec![PathBuf::from("a.jpg")];
        assert_eq!(app.check_requirements().unwrap_err(), "No directory selected");

        app.destination = Some(PathBuf::from("out"));
        app.min_dimension = String::new();
        assert_eq!(
            app.check_requirements().unwrap_err(),
            "Minimum dimension must be greater than 0"
        );

        app.min_dimension = String::from("700");
        app.quality = 65;
        let config = app.check_requirements().unwrap();
        assert_eq!(config.min_dimension, 700);
        assert_eq!(config.quality, 65);
        assert_eq!(config.destination, PathBuf::from("out"));
    }
}
