//! # VasthraAI Studio
//!
//! Desktop front end for the sketch-to-design generation service.
//! Built with the Iced framework.
//!
//! Two screens share one window:
//! - **Upload**: drop or pick a PNG/JPEG sketch, then generate
//! - **View Designs**: original sketch beside the generated design, with download
//!
//! The result moves between screens inside [`Route::ViewDesigns`]; no state
//! outlives the screen that owns it.

use std::path::PathBuf;

use iced::widget::image::Handle;
use iced::widget::{column, container, rule};
use iced::{event, window, Element, Event, Length, Size, Subscription, Task, Theme};
use tracing::{error, info, warn};

use vasthra_core::config;
use vasthra_core::download::{download_dir_for, save_design};
use vasthra_core::errors::{VasthraError, VasthraResult};
use vasthra_core::generation::{GenerationClient, GenerationOutcome};
use vasthra_core::handoff::{Route, ViewerEntry};
use vasthra_core::sketch::{picker_extensions, SketchFile};
use vasthra_core::uploader::Uploader;
use vasthra_core::viewer::{ImageKind, Viewer};
use vasthra_core::{logging, ServiceConfig};

mod ui;

fn main() -> iced::Result {
    logging::init("info,wgpu=warn,naga=warn");

    let config = config::load()
        .unwrap_or_else(|e| {
            warn!(error = %e, "Could not load settings, using defaults");
            ServiceConfig::default()
        })
        .with_env_overrides();

    let client = match GenerationClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Cannot start without an HTTP client");
            std::process::exit(1);
        }
    };

    info!(service = %client.config().base_url, "Starting VasthraAI Studio");

    iced::application(move || App::new(client.clone()), App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .subscription(App::subscription)
        .window_size(Size::new(1024.0, 680.0))
        .centered()
        .run()
}

/// Upload screen: core state plus the decoded preview of the selection
pub struct UploadScreen {
    pub uploader: Uploader,
    pub preview: Option<Handle>,
}

impl UploadScreen {
    fn new() -> Self {
        UploadScreen {
            uploader: Uploader::new(),
            preview: None,
        }
    }

    /// Rebuild the preview after the selection changed
    fn sync_preview(&mut self) {
        self.preview = self
            .uploader
            .selected()
            .map(|file| Handle::from_bytes(file.bytes.clone()));
    }
}

/// Viewer screen: core state plus image handles built once per fetch
pub struct ViewScreen {
    pub viewer: Viewer,
    pub original: Option<Handle>,
    pub generated: Option<Handle>,
}

impl ViewScreen {
    pub fn handle(&self, kind: ImageKind) -> Option<&Handle> {
        match kind {
            ImageKind::OriginalSketch => self.original.as_ref(),
            ImageKind::GeneratedDesign => self.generated.as_ref(),
        }
    }
}

pub enum Screen {
    Upload(UploadScreen),
    ViewDesigns(ViewScreen),
}

impl Screen {
    fn title(&self) -> &'static str {
        match self {
            Screen::Upload(_) => "Upload Page",
            Screen::ViewDesigns(_) => "View Designs",
        }
    }
}

/// Main application state
pub struct App {
    client: GenerationClient,
    screen: Screen,
    /// Last status message for the status bar
    status: String,
}

#[derive(Debug, Clone)]
pub enum Message {
    // Upload screen
    PickFile,
    FilePicked(Option<PathBuf>),
    FileDropped(PathBuf),
    SketchLoaded(Option<SketchFile>),
    Reset,
    Generate,
    GenerationFinished(VasthraResult<GenerationOutcome>),

    // View Designs screen
    ImageFetched(ImageKind, String, VasthraResult<Vec<u8>>),
    NewDesign,
    Download,
    DownloadFinished(VasthraResult<PathBuf>),
}

impl App {
    fn new(client: GenerationClient) -> (Self, Task<Message>) {
        (
            App {
                client,
                screen: Screen::Upload(UploadScreen::new()),
                status: "Ready".to_string(),
            },
            Task::none(),
        )
    }

    fn title(&self) -> String {
        format!("VasthraAI - {}", self.screen.title())
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }

    fn subscription(&self) -> Subscription<Message> {
        match self.screen {
            // File drops only select sketches on the upload screen
            Screen::Upload(_) => event::listen_with(|event, _status, _window| {
                if let Event::Window(window::Event::FileDropped(path)) = event {
                    return Some(Message::FileDropped(path));
                }
                None
            }),
            Screen::ViewDesigns(_) => Subscription::none(),
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickFile => {
                if self.uploader().is_some_and(|u| u.controls_enabled()) {
                    return Task::perform(pick_sketch(), Message::FilePicked);
                }
                Task::none()
            }
            Message::FilePicked(None) => Task::none(),
            Message::FilePicked(Some(path)) | Message::FileDropped(path) => {
                // Drops share the picker's gate: no new selection while generating
                if !self.uploader().is_some_and(|u| u.controls_enabled()) {
                    return Task::none();
                }
                Task::perform(load_sketch(path), Message::SketchLoaded)
            }
            Message::SketchLoaded(candidate) => {
                if let Screen::Upload(screen) = &mut self.screen {
                    screen.uploader.select(candidate);
                    screen.sync_preview();
                }
                Task::none()
            }
            Message::Reset => {
                if let Screen::Upload(screen) = &mut self.screen {
                    screen.uploader.reset();
                    screen.sync_preview();
                }
                Task::none()
            }
            Message::Generate => {
                let Screen::Upload(screen) = &mut self.screen else {
                    return Task::none();
                };
                let Some(sketch) = screen.uploader.begin_generate() else {
                    return Task::none();
                };

                self.status = format!("Generating design from {}...", sketch.name);
                let client = self.client.clone();
                Task::perform(
                    async move { client.generate(&sketch).await },
                    Message::GenerationFinished,
                )
            }
            Message::GenerationFinished(result) => {
                let Screen::Upload(screen) = &mut self.screen else {
                    return Task::none();
                };
                match screen.uploader.finish_generate(result) {
                    Some(route) => self.navigate(route),
                    None => {
                        self.status = "Generation failed".to_string();
                        Task::none()
                    }
                }
            }
            Message::ImageFetched(kind, path, result) => {
                if let Screen::ViewDesigns(screen) = &mut self.screen {
                    if !screen.viewer.set_image(kind, &path, result) {
                        return Task::none();
                    }
                    let handle = screen
                        .viewer
                        .image(kind)
                        .map(|bytes| Handle::from_bytes(bytes.to_vec()));
                    match kind {
                        ImageKind::OriginalSketch => screen.original = handle,
                        ImageKind::GeneratedDesign => screen.generated = handle,
                    }
                }
                Task::none()
            }
            Message::NewDesign => match &self.screen {
                Screen::ViewDesigns(screen) => {
                    let route = screen.viewer.new_design();
                    self.navigate(route)
                }
                Screen::Upload(_) => Task::none(),
            },
            Message::Download => {
                let Screen::ViewDesigns(screen) = &self.screen else {
                    return Task::none();
                };
                let Some(path) = screen.viewer.download_path() else {
                    return Task::none();
                };

                let client = self.client.clone();
                let path = path.to_string();
                let dir = download_dir_for(self.client.config());
                Task::perform(download_design(client, path, dir), Message::DownloadFinished)
            }
            Message::DownloadFinished(Ok(path)) => {
                self.status = format!("Design saved to {}", path.display());
                Task::none()
            }
            Message::DownloadFinished(Err(e)) => {
                // Best-effort: logged, no inline error
                warn!(error = %e, "Download failed");
                Task::none()
            }
        }
    }

    /// Replace the current screen
    fn navigate(&mut self, route: Route) -> Task<Message> {
        info!(route = route.name(), "Navigating");
        match route {
            Route::Upload => {
                self.screen = Screen::Upload(UploadScreen::new());
                self.status = "Ready".to_string();
                Task::none()
            }
            Route::ViewDesigns(record) => match Viewer::enter(ViewerEntry::Ready(record)) {
                Ok(viewer) => {
                    let fetches = viewer
                        .pending_fetches()
                        .into_iter()
                        .map(|(kind, path)| {
                            let client = self.client.clone();
                            let requested = path.clone();
                            Task::perform(
                                async move { client.fetch_image(&path).await },
                                move |result| Message::ImageFetched(kind, requested, result),
                            )
                        })
                        .collect::<Vec<_>>();

                    self.screen = Screen::ViewDesigns(ViewScreen {
                        viewer,
                        original: None,
                        generated: None,
                    });
                    self.status = "Design ready".to_string();
                    Task::batch(fetches)
                }
                Err(redirect) => self.navigate(redirect),
            },
        }
    }

    fn uploader(&self) -> Option<&Uploader> {
        match &self.screen {
            Screen::Upload(screen) => Some(&screen.uploader),
            Screen::ViewDesigns(_) => None,
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let body = match &self.screen {
            Screen::Upload(screen) => ui::upload_page::view(screen),
            Screen::ViewDesigns(screen) => ui::view_designs::view(screen),
        };

        let content = column![
            ui::header::view_header(self.screen.title()),
            rule::horizontal(1),
            container(body).height(Length::Fill),
            rule::horizontal(1),
            ui::status_bar::view_status_bar(&self.client.config().base_url, &self.status),
        ]
        .spacing(8)
        .padding(12);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

/// Show the native picker, filtered to accepted sketch types
async fn pick_sketch() -> Option<PathBuf> {
    let extensions = picker_extensions();
    rfd::AsyncFileDialog::new()
        .set_title("Select a sketch")
        .add_filter("Sketch images", extensions.as_slice())
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

/// Read a candidate off the UI thread. Unreadable files yield `None`.
async fn load_sketch(path: PathBuf) -> Option<SketchFile> {
    let shown = path.display().to_string();
    match tokio::task::spawn_blocking(move || SketchFile::from_path(&path)).await {
        Ok(Ok(sketch)) => Some(sketch),
        Ok(Err(e)) => {
            warn!(error = %e, "Could not read sketch");
            None
        }
        Err(e) => {
            warn!(path = %shown, error = %e, "Sketch read task failed");
            None
        }
    }
}

/// Re-fetch the generated image and save it under the fixed design name
async fn download_design(client: GenerationClient, path: String, dir: PathBuf) -> VasthraResult<PathBuf> {
    let bytes = client.fetch_image(&path).await?;
    let target = dir.display().to_string();

    tokio::task::spawn_blocking(move || save_design(&bytes, &dir))
        .await
        .map_err(|e| VasthraError::file_error("save design", target, e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use vasthra_core::errors::INVALID_TYPE_MESSAGE;
    use vasthra_core::handoff::DesignRecord;

    fn app() -> App {
        let client = GenerationClient::new(ServiceConfig::default()).unwrap();
        App::new(client).0
    }

    fn record() -> DesignRecord {
        DesignRecord::new("/media/gen1.png", "/media/orig1.png")
    }

    #[test]
    fn invalid_sketch_shows_inline_error() {
        let mut app = app();
        let _ = app.update(Message::SketchLoaded(Some(SketchFile::new("a.gif", "image/gif", vec![]))));

        let uploader = app.uploader().unwrap();
        assert_eq!(uploader.error(), Some(INVALID_TYPE_MESSAGE));
        assert!(uploader.selected().is_none());
    }

    #[test]
    fn cancelled_picker_changes_nothing() {
        let mut app = app();
        let _ = app.update(Message::FilePicked(None));

        let uploader = app.uploader().unwrap();
        assert_eq!(uploader.error(), None);
        assert!(uploader.selected().is_none());
    }

    #[test]
    fn successful_generation_opens_viewer_and_new_design_returns() {
        let mut app = app();
        let _ = app.update(Message::SketchLoaded(Some(SketchFile::new(
            "peacock.png",
            "image/png",
            vec![1, 2, 3],
        ))));
        let _ = app.update(Message::Generate);
        assert!(app.uploader().is_some_and(|u| u.is_busy()));

        let _ = app.update(Message::GenerationFinished(Ok(GenerationOutcome::Generated(record()))));
        match &app.screen {
            Screen::ViewDesigns(screen) => assert_eq!(screen.viewer.record(), &record()),
            Screen::Upload(_) => panic!("expected the viewer"),
        }
        assert_eq!(app.title(), "VasthraAI - View Designs");

        let _ = app.update(Message::NewDesign);
        assert!(app.uploader().is_some_and(|u| u.selected().is_none()));
    }

    #[test]
    fn failed_image_fetch_keeps_placeholder() {
        let mut app = app();
        let _ = app.navigate(Route::ViewDesigns(record()));
        let _ = app.update(Message::ImageFetched(
            ImageKind::GeneratedDesign,
            "/media/gen1.png".to_string(),
            Err(VasthraError::transport("http://localhost:8000/media/gen1.png", "refused")),
        ));
        let _ = app.update(Message::ImageFetched(
            ImageKind::OriginalSketch,
            "/media/orig1.png".to_string(),
            Ok(vec![1, 2, 3]),
        ));

        let Screen::ViewDesigns(screen) = &app.screen else {
            panic!("expected the viewer");
        };
        assert!(screen.handle(ImageKind::GeneratedDesign).is_none());
        assert!(screen.handle(ImageKind::OriginalSketch).is_some());
    }

    #[test]
    fn late_fetch_from_previous_design_is_ignored() {
        let mut app = app();
        let _ = app.navigate(Route::ViewDesigns(record()));
        let _ = app.update(Message::NewDesign);

        let second = DesignRecord::new("/media/gen2.png", "/media/orig2.png");
        let _ = app.navigate(Route::ViewDesigns(second.clone()));
        let _ = app.update(Message::ImageFetched(
            ImageKind::OriginalSketch,
            "/media/orig2.png".to_string(),
            Ok(b"B-sketch".to_vec()),
        ));

        // The first design's fetches finish only now
        let _ = app.update(Message::ImageFetched(
            ImageKind::OriginalSketch,
            "/media/orig1.png".to_string(),
            Ok(b"A-sketch".to_vec()),
        ));
        let _ = app.update(Message::ImageFetched(
            ImageKind::GeneratedDesign,
            "/media/gen1.png".to_string(),
            Ok(b"A-design".to_vec()),
        ));

        let Screen::ViewDesigns(screen) = &app.screen else {
            panic!("expected the viewer");
        };
        assert_eq!(screen.viewer.record(), &second);
        assert_eq!(screen.viewer.image(ImageKind::OriginalSketch), Some(&b"B-sketch"[..]));
        assert_eq!(screen.viewer.image(ImageKind::GeneratedDesign), None);
        assert!(screen.handle(ImageKind::GeneratedDesign).is_none());
    }

    #[test]
    fn failed_download_changes_nothing_visible() {
        let mut app = app();
        let _ = app.navigate(Route::ViewDesigns(record()));
        let status = app.status.clone();

        let _ = app.update(Message::DownloadFinished(Err(VasthraError::HttpStatus {
            url: "http://localhost:8000/media/gen1.png".to_string(),
            status: 404,
        })));

        assert_eq!(app.status, status);
        let Screen::ViewDesigns(screen) = &app.screen else {
            panic!("expected the viewer");
        };
        assert_eq!(screen.viewer.record(), &record());
        assert!(screen.viewer.can_download());
    }

    #[test]
    fn successful_download_is_reported_in_status() {
        let mut app = app();
        let _ = app.navigate(Route::ViewDesigns(record()));

        let _ = app.update(Message::DownloadFinished(Ok(PathBuf::from("/tmp/vasthra-design.png"))));
        assert_eq!(app.status, "Design saved to /tmp/vasthra-design.png");
    }

    #[test]
    fn drop_while_generating_keeps_selection() {
        let mut app = app();
        let _ = app.update(Message::SketchLoaded(Some(SketchFile::new(
            "peacock.png",
            "image/png",
            vec![1, 2, 3],
        ))));
        let _ = app.update(Message::Generate);

        let _ = app.update(Message::FileDropped(PathBuf::from("/tmp/other.gif")));
        // A load that was already running when generation started
        let _ = app.update(Message::SketchLoaded(Some(SketchFile::new("lotus.jpg", "image/jpeg", vec![4]))));

        let uploader = app.uploader().unwrap();
        assert!(uploader.is_busy());
        assert_eq!(uploader.selected().map(|f| f.name.as_str()), Some("peacock.png"));
        assert_eq!(uploader.error(), None);
    }
}
