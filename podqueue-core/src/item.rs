use std::fmt::Display;
use std::path::Path;

/// A single playable episode.
///
/// Items are immutable once built; the controller only ever replaces whole
/// queues, it never edits an item in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayableItem {
    /// Episode title shown in lists and the now-playing panel
    pub title: String,
    /// Hosts / guests, free-form display text
    pub members: String,
    /// Artwork location
    pub thumbnail_url: String,
    /// Episode length in seconds
    pub duration_seconds: u32,
    /// Source handed to the audio element
    pub media_url: String,
}

impl PlayableItem {
    pub fn new(title: impl Into<String>, media_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            media_url: media_url.into(),
            ..Self::default()
        }
    }

    pub fn with_members(mut self, members: impl Into<String>) -> Self {
        self.members = members.into();
        self
    }

    pub fn with_thumbnail(mut self, thumbnail_url: impl Into<String>) -> Self {
        self.thumbnail_url = thumbnail_url.into();
        self
    }

    pub fn with_duration(mut self, duration_seconds: u32) -> Self {
        self.duration_seconds = duration_seconds;
        self
    }

    /// Build an item from a local media file, using the file stem as title.
    pub fn from_path(path: &Path) -> Self {
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        Self::new(title, path.to_string_lossy())
    }

    /// Duration as MM:SS, or H:MM:SS for episodes of an hour or more
    pub fn display_duration(&self) -> String {
        format_seconds(self.duration_seconds)
    }
}

impl Display for PlayableItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.members.is_empty() {
            write!(f, "{} ({})", self.title, self.display_duration())
        } else {
            write!(
                f,
                "{} - {} ({})",
                self.title,
                self.members,
                self.display_duration()
            )
        }
    }
}

pub fn format_seconds(total: u32) -> String {
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_every_field() {
        let item = PlayableItem::new("Ep1", "a.mp3")
            .with_members("Host")
            .with_thumbnail("t.png")
            .with_duration(100);

        assert_eq!(item.title, "Ep1");
        assert_eq!(item.members, "Host");
        assert_eq!(item.thumbnail_url, "t.png");
        assert_eq!(item.duration_seconds, 100);
        assert_eq!(item.media_url, "a.mp3");
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_seconds(0), "00:00");
        assert_eq!(format_seconds(100), "01:40");
        assert_eq!(format_seconds(3600), "1:00:00");
        assert_eq!(format_seconds(3725), "1:02:05");
    }

    #[test]
    fn from_path_uses_file_stem() {
        let item = PlayableItem::from_path(Path::new("/tmp/shows/episode-12.mp3"));
        assert_eq!(item.title, "episode-12");
        assert_eq!(item.media_url, "/tmp/shows/episode-12.mp3");
        assert_eq!(item.duration_seconds, 0);
    }

    #[test]
    fn display_includes_members_when_present() {
        let bare = PlayableItem::new("Ep1", "a.mp3").with_duration(61);
        assert_eq!(bare.to_string(), "Ep1 (01:01)");

        let hosted = bare.with_members("Host");
        assert_eq!(hosted.to_string(), "Ep1 - Host (01:01)");
    }
}
