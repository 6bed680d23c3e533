use std::fs;
use std::path::Path;

use anyhow::Context;
use upload_core::{
    update, AttemptStatus, FileSelection, Msg, SelectedFile, UploadFailure, WidgetState,
    WidgetViewModel,
};
use upload_engine::BlobStore;
use upload_logging::{upload_debug, upload_error, upload_info, upload_warn};

use super::config::load_config;
use super::effects::EffectRunner;
use super::ui::page::{HeadlessPage, Page};
use super::ui::render::render;
use crate::Args;

/// Upload widget bound to an injected page.
///
/// Owns the pure state, the last rendered view and the collaborators that
/// carry out effects.
pub struct Widget<P: Page> {
    state: WidgetState,
    rendered: WidgetViewModel,
    page: P,
    runner: EffectRunner,
    blobs: BlobStore,
    image_url: Option<String>,
}

impl<P: Page> Widget<P> {
    /// `page` must show the idle markup: disabled submit, hidden image.
    pub fn new(page: P, runner: EffectRunner, blobs: BlobStore) -> Self {
        let state = WidgetState::new();
        let rendered = state.view();
        Self {
            state,
            rendered,
            page,
            runner,
            blobs,
            image_url: None,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn status(&self) -> AttemptStatus {
        self.state.status()
    }

    pub fn on_file_selection_changed(&mut self, selection: FileSelection) {
        self.dispatch(Msg::FileSelectionChanged(selection));
    }

    pub fn on_submit_clicked(&mut self) {
        self.dispatch(Msg::SubmitClicked);
    }

    /// Applies a message, updates the page, then starts any effects.
    ///
    /// The page is updated before effects run so the button is already
    /// disabled when the request goes out.
    pub fn dispatch(&mut self, msg: Msg) {
        let msg = self.stage_image(msg);
        let (state, effects) = update(std::mem::take(&mut self.state), msg);
        self.state = state;
        if self.state.consume_dirty() {
            let view = self.state.view();
            for command in render(&self.rendered, &view, self.image_url.as_deref()) {
                self.page.apply(command);
            }
            self.rendered = view;
        }
        self.runner.enqueue(effects);
    }

    /// Waits for the in-flight upload to resolve. Without a request timeout
    /// this blocks for as long as the server keeps the request open.
    pub fn run_until_settled(&mut self) -> AttemptStatus {
        while self.state.status() == AttemptStatus::InFlight {
            match self.runner.next_msg() {
                Some(msg) => self.dispatch(msg),
                None => {
                    upload_error!("Engine stopped while an upload was in flight");
                    break;
                }
            }
        }
        self.state.status()
    }

    /// Stores a successful response body before the core sees it. If the
    /// body cannot be stored the attempt is reported as failed, so the page
    /// never shows an image without a source.
    fn stage_image(&mut self, msg: Msg) -> Msg {
        let blob = match msg {
            Msg::UploadCompleted(Ok(blob)) if self.state.status() == AttemptStatus::InFlight => {
                blob
            }
            other => return other,
        };
        let source_name = self
            .selected_file_name()
            .unwrap_or_else(|| "upload".to_string());
        match self
            .blobs
            .publish(&source_name, &blob.bytes, blob.content_type.as_deref())
        {
            Ok(blob_ref) => {
                self.image_url = Some(blob_ref.url);
                Msg::UploadCompleted(Ok(blob))
            }
            Err(err) => {
                upload_error!("Failed to store result image: {}", err);
                Msg::UploadCompleted(Err(UploadFailure::Storage {
                    message: err.to_string(),
                }))
            }
        }
    }

    fn selected_file_name(&self) -> Option<String> {
        self.state
            .selection()
            .first()
            .map(|file| file.name.clone())
    }
}

pub fn run_app(args: &Args) -> anyhow::Result<AttemptStatus> {
    upload_logging::initialize(
        args.log,
        log::LevelFilter::Info,
        &upload_logging::default_log_file(),
    );

    let config = load_config(args.config.as_deref())?;
    let mut settings = config.upload_settings();
    if let Some(endpoint) = &args.endpoint {
        settings.endpoint = endpoint.clone();
    }
    let output_dir = args.output_dir.clone().unwrap_or_else(|| config.output_dir());
    upload_info!(
        "Uploading to {} (output {:?})",
        settings.endpoint,
        output_dir
    );

    let runner = EffectRunner::new(settings).context("starting upload engine")?;
    let mut widget = Widget::new(HeadlessPage::new(), runner, BlobStore::new(output_dir));

    let selection = read_selection(&args.files)?;
    widget.on_file_selection_changed(selection);
    widget.on_submit_clicked();
    if widget.status() == AttemptStatus::Idle {
        upload_warn!("No file selected; submit stays disabled");
    }

    let status = widget.run_until_settled();
    upload_debug!(
        "Settled as {:?} after {} page commands",
        status,
        widget.page().history().len()
    );
    println!("{}", widget.page());
    Ok(status)
}

fn read_selection(paths: &[impl AsRef<Path>]) -> anyhow::Result<FileSelection> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        files.push(SelectedFile::new(name, bytes));
    }
    Ok(FileSelection::new(files))
}
