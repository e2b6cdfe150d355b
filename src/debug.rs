//! Best-effort capture of page state for selector maintenance.
//!
//! The target markup is unstable, so every stage can snapshot what it saw:
//! raw markup, a readable re-indented dump, screenshots and the individual
//! result-candidate fragments. Writing an artifact must never affect the
//! pipeline; every failure here is logged and swallowed.

use crate::browser::BrowserSession;
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Artifact sink bound to one run's debug directory.
///
/// Disabled captures are no-ops; enabled ones record which files each stage
/// produced, in write order.
pub struct DebugCapture {
    enabled: bool,
    dir: PathBuf,
    artifacts: IndexMap<String, Vec<PathBuf>>,
}

impl DebugCapture {
    /// Create a capture sink. When enabled, the directory is created up
    /// front; failure to create it disables capture for the run.
    pub fn new(enabled: bool, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let enabled = if enabled {
            match fs::create_dir_all(&dir) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("Could not create debug directory {}: {}", dir.display(), e);
                    false
                }
            }
        } else {
            false
        };

        Self { enabled, dir, artifacts: IndexMap::new() }
    }

    /// Capture sink that never writes anything
    pub fn disabled() -> Self {
        Self { enabled: false, dir: PathBuf::new(), artifacts: IndexMap::new() }
    }

    /// Whether artifacts are being written
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Directory receiving the artifacts
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far for a stage, in write order
    pub fn recorded(&self, stage: &str) -> &[PathBuf] {
        self.artifacts.get(stage).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Write raw page markup
    pub fn html(&mut self, stage: &str, name: &str, markup: &str) {
        self.write(stage, name, markup.as_bytes());
    }

    /// Write a re-indented copy of the markup, one tag per line
    pub fn pretty_html(&mut self, stage: &str, name: &str, markup: &str) {
        let pretty = prettify(markup);
        self.write(stage, name, pretty.as_bytes());
    }

    /// Write a plain-text artifact (e.g. an error trace)
    pub fn text(&mut self, stage: &str, name: &str, contents: &str) {
        self.write(stage, name, contents.as_bytes());
    }

    /// Capture and write a screenshot of the current page
    pub fn screenshot(&mut self, stage: &str, name: &str, session: &BrowserSession) {
        if !self.enabled {
            return;
        }
        match session.screenshot() {
            Ok(png) => self.write(stage, name, &png),
            Err(e) => log::debug!("Could not capture screenshot for {}: {}", name, e),
        }
    }

    fn write(&mut self, stage: &str, name: &str, bytes: &[u8]) {
        if !self.enabled {
            return;
        }
        let path = self.dir.join(name);
        match fs::write(&path, bytes) {
            Ok(()) => {
                self.artifacts.entry(stage.to_string()).or_default().push(path);
            }
            Err(e) => log::debug!("Failed to write debug artifact {}: {}", path.display(), e),
        }
    }
}

/// Re-indent markup so nesting is readable in a text editor. Good enough for
/// eyeballing candidate blocks; not a serializer.
fn prettify(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len() + markup.len() / 8);
    let mut depth: usize = 0;
    let mut leading = true;

    for piece in markup.split('<') {
        // Anything before the first '<' is bare text, not a tag
        if leading {
            leading = false;
            let text = piece.trim();
            if !text.is_empty() {
                out.push_str(text);
            }
            continue;
        }
        let tag = format!("<{}", piece);
        let trimmed = tag.trim();
        if trimmed.starts_with("</") {
            depth = depth.saturating_sub(1);
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&"  ".repeat(depth));
        out.push_str(trimmed);
        let opens = !trimmed.starts_with("</")
            && !trimmed.starts_with("<!")
            && !trimmed.contains("/>")
            && !is_void_tag(trimmed);
        if opens {
            depth += 1;
        }
    }

    out
}

fn is_void_tag(tag: &str) -> bool {
    const VOID: &[&str] = &[
        "<area", "<base", "<br", "<col", "<embed", "<hr", "<img", "<input", "<link", "<meta",
        "<param", "<source", "<track", "<wbr",
    ];
    let lower = tag.to_ascii_lowercase();
    VOID.iter().any(|v| {
        lower.strip_prefix(v).map_or(false, |rest| {
            rest.starts_with(' ') || rest.starts_with('>') || rest.starts_with('/')
        })
    })
}
