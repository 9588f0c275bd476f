//! # The editing surface
//!
//! Bridges an [`EditorWidget`] to the save flow. Two commands are
//! intercepted: image insertion goes through the file picker and the upload
//! service, link editing goes through a URL prompt. Every change hands the
//! complete current tree to the change callback.
mod tree;
mod widget;

pub use tree::{Selection, TreeEditor};
pub use widget::EditorWidget;

use crate::model::{ImageAttrs, LinkAttrs, MarkType, Node, NodeType};
use crate::upload::{UploadError, UploadFile, Uploader};
use displaydoc::Display;
use futures_util::future::BoxFuture;
use log::*;
use std::sync::Arc;
use thiserror::Error;

/// A user-visible editing failure; the document is left as it was
#[derive(Debug, Error, Display)]
pub enum EditorError {
    /// Image upload failed: {0}
    Upload(#[from] UploadError),
}

/// Uploads a picked image and returns the URL to embed
pub trait ImageUploader: Send + Sync {
    fn upload(&self, file: UploadFile) -> BoxFuture<'_, Result<String, UploadError>>;
}

/// Uploads straight through the server's [`Uploader`]
#[derive(Clone)]
pub struct UploadService(pub Uploader);

impl ImageUploader for UploadService {
    fn upload(&self, file: UploadFile) -> BoxFuture<'_, Result<String, UploadError>> {
        Box::pin(async move { Ok(self.0.upload(file).await?.url) })
    }
}

/// The interactive collaborators of the surface
pub trait Prompter {
    /// Let the user pick a local image; `None` if they cancel
    fn pick_image(&mut self) -> Option<UploadFile>;

    /// Ask for a link URL starting from the current one; `None` if dismissed
    fn prompt_url(&mut self, current: Option<&str>) -> Option<String>;

    /// Ask whether the link should be marked `nofollow`
    fn confirm_nofollow(&mut self) -> bool;
}

/// A toolbar button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarCommand {
    ToggleMark(MarkType),
    Heading(u8),
    BulletList,
    OrderedList,
    Blockquote,
    Undo,
    Redo,
}

type OnChange = Box<dyn FnMut(&Node) + Send>;

/// The editing surface around a widget
pub struct EditingSurface<W> {
    widget: W,
    uploader: Arc<dyn ImageUploader>,
    prompter: Box<dyn Prompter + Send>,
    on_change: OnChange,
}

impl<W: EditorWidget> EditingSurface<W> {
    pub fn new(
        widget: W,
        uploader: Arc<dyn ImageUploader>,
        prompter: Box<dyn Prompter + Send>,
        on_change: OnChange,
    ) -> Self {
        Self {
            widget,
            uploader,
            prompter,
            on_change,
        }
    }

    /// The document to display, or nothing while the widget is loading
    pub fn view(&self) -> Option<&Node> {
        if self.widget.is_ready() {
            Some(self.widget.document())
        } else {
            None
        }
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Direct widget access for typing and selection
    ///
    /// Changes made here are reported by calling [`notify`](Self::notify).
    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn character_count(&self) -> usize {
        if self.widget.is_ready() {
            self.widget.character_count()
        } else {
            0
        }
    }

    /// Report the current tree to the change callback
    pub fn notify(&mut self) {
        (self.on_change)(self.widget.document());
    }

    fn changed(&mut self, changed: bool) -> bool {
        if changed {
            self.notify();
        }
        changed
    }

    /// Pick a file, upload it and insert it as an image at the cursor
    ///
    /// Returns whether an image was inserted.
    pub async fn add_image(&mut self) -> Result<bool, EditorError> {
        if !self.widget.is_ready() {
            return Ok(false);
        }
        let file = match self.prompter.pick_image() {
            Some(file) => file,
            None => return Ok(false),
        };
        let src = match self.uploader.upload(file).await {
            Ok(src) => src,
            Err(err) => {
                error!("Image upload failed: {}", err);
                return Err(err.into());
            }
        };
        let inserted = self.widget.insert_image(ImageAttrs::new(src));
        Ok(self.changed(inserted))
    }

    /// Prompt for a URL and set, replace or remove the link on the selection
    pub fn set_link(&mut self) -> bool {
        if !self.widget.is_ready() {
            return false;
        }
        let previous = self.widget.active_link().map(|link| link.href);
        let url = match self.prompter.prompt_url(previous.as_deref()) {
            Some(url) => url,
            None => return false,
        };

        self.widget.extend_mark_range(&MarkType::Link);
        if url.is_empty() {
            let changed = self.widget.unset_link();
            return self.changed(changed);
        }

        let mut link = LinkAttrs::new(url);
        if self.prompter.confirm_nofollow() {
            link.rel = Some("nofollow".into());
        }
        let changed = self.widget.set_link(link);
        self.changed(changed)
    }

    pub fn run(&mut self, command: ToolbarCommand) -> bool {
        if !self.widget.is_ready() {
            return false;
        }
        let changed = match command {
            ToolbarCommand::ToggleMark(kind) => self.widget.toggle_mark(kind),
            ToolbarCommand::Heading(level) => self.widget.toggle_heading(level),
            ToolbarCommand::BulletList => self.widget.toggle_wrap(NodeType::BulletList),
            ToolbarCommand::OrderedList => self.widget.toggle_wrap(NodeType::OrderedList),
            ToolbarCommand::Blockquote => self.widget.toggle_wrap(NodeType::Blockquote),
            ToolbarCommand::Undo => self.widget.undo(),
            ToolbarCommand::Redo => self.widget.redo(),
        };
        self.changed(changed)
    }
}
