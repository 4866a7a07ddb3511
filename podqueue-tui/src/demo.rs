use std::path::PathBuf;

use podqueue_core::PlayableItem;

/// Episodes loaded when no media paths are given on the command line
pub fn demo_episodes() -> Vec<PlayableItem> {
    vec![
        PlayableItem::new("Welcome to the show", "demo/001-welcome.mp3")
            .with_members("Ana, Rui")
            .with_thumbnail("demo/001.png")
            .with_duration(20),
        PlayableItem::new("Ownership without tears", "demo/002-ownership.mp3")
            .with_members("Ana, Rui, Guest: Marta")
            .with_thumbnail("demo/002.png")
            .with_duration(35),
        PlayableItem::new("Borrowing, again", "demo/003-borrowing.mp3")
            .with_members("Rui")
            .with_thumbnail("demo/003.png")
            .with_duration(25),
        PlayableItem::new("Listener questions", "demo/004-questions.mp3")
            .with_members("Ana, Rui")
            .with_thumbnail("demo/004.png")
            .with_duration(30),
    ]
}

/// Items for the given paths, or the demo list when there are none
pub fn initial_episodes(paths: &[PathBuf]) -> Vec<PlayableItem> {
    if paths.is_empty() {
        return demo_episodes();
    }
    paths.iter().map(|p| PlayableItem::from_path(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_demo_list() {
        assert_eq!(initial_episodes(&[]), demo_episodes());
    }

    #[test]
    fn paths_become_items_in_order() {
        let items = initial_episodes(&[PathBuf::from("x/one.mp3"), PathBuf::from("two.ogg")]);
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "two"]);
    }
}
