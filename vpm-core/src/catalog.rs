/// A video player the menu knows how to manage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerEntry {
    /// Menu key the user types to select this player
    pub key: &'static str,
    /// Human readable name shown in the menu
    pub name: &'static str,
    /// Package name handed to the package manager
    pub package: &'static str,
}

/// All players offered in the menu, in display order
pub const PLAYERS: &[PlayerEntry] = &[
    PlayerEntry {
        key: "1",
        name: "VLC Media Player",
        package: "vlc",
    },
    PlayerEntry {
        key: "2",
        name: "MPV Media Player",
        package: "mpv",
    },
    PlayerEntry {
        key: "3",
        name: "SMPlayer",
        package: "smplayer",
    },
    PlayerEntry {
        key: "4",
        name: "MPlayer",
        package: "mplayer",
    },
    PlayerEntry {
        key: "5",
        name: "Celluloid",
        package: "celluloid",
    },
    PlayerEntry {
        key: "6",
        name: "Xine Player",
        package: "xine-ui",
    },
];

/// Looks up a player by its menu key
pub fn find_player(key: &str) -> Option<&'static PlayerEntry> {
    PLAYERS.iter().find(|player| player.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_six_players() {
        assert_eq!(PLAYERS.len(), 6);
    }

    #[test]
    fn test_keys_are_one_through_six_in_order() {
        let keys: Vec<&str> = PLAYERS.iter().map(|p| p.key).collect();
        assert_eq!(keys, vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_find_player_by_key() {
        let mpv = find_player("2").unwrap();
        assert_eq!(mpv.package, "mpv");
        assert_eq!(mpv.name, "MPV Media Player");

        assert_eq!(find_player("6").unwrap().package, "xine-ui");
    }

    #[test]
    fn test_find_player_rejects_unknown_keys() {
        assert!(find_player("0").is_none());
        assert!(find_player("7").is_none());
        assert!(find_player("9").is_none());
        assert!(find_player("vlc").is_none());
        assert!(find_player("").is_none());
    }

    #[test]
    fn test_entries_have_names_and_packages() {
        for player in PLAYERS {
            assert!(!player.name.is_empty());
            assert!(!player.package.is_empty());
            assert!(!player.package.contains(' '));
        }
    }
}
