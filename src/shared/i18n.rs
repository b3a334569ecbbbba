use strum_macros::Display;

/// Display language of every user facing string.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    #[strum(to_string = "ja")]
    Ja,

    #[strum(to_string = "en")]
    En,
}

impl Language {
    /// Picks the language for a locale identifier such as `ja`, `ja-JP` or `en_US.UTF-8`.
    ///
    /// Japanese locales select `Ja`, everything else falls back to `En`.
    pub fn from_locale(locale: &str) -> Self {
        if locale.trim().to_ascii_lowercase().starts_with("ja") {
            Language::Ja
        } else {
            Language::En
        }
    }
}

/// Keys of the message table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgKey {
    CommandName,
    MenuTitle,
    NoFileSelected,
    NotFileSystem,
    ErrorSyncing,
    ErrorGettingStats,
    SyncSuccess,
    BatchSuccess,
}

/// Looks up the text of `key` in `language`.
pub fn t(language: Language, key: MsgKey) -> &'static str {
    match language {
        Language::Ja => match key {
            MsgKey::CommandName => "修正日時を作成日時に同期",
            MsgKey::MenuTitle => "修正日時を作成日時に同期",
            MsgKey::NoFileSelected => "ファイルが選択されていません。",
            MsgKey::NotFileSystem => {
                "このプラグインはファイルシステムアダプターでのみ動作します。"
            }
            MsgKey::ErrorSyncing => "時刻の同期中にエラーが発生しました",
            MsgKey::ErrorGettingStats => "ファイル情報の取得中にエラーが発生しました。",
            MsgKey::SyncSuccess => "修正日時を作成日時に同期しました",
            MsgKey::BatchSuccess => "完了: {success} 件, 失敗: {fail} 件",
        },
        Language::En => match key {
            MsgKey::CommandName => "Sync mtime to created",
            MsgKey::MenuTitle => "Sync mtime to created",
            MsgKey::NoFileSelected => "No file selected.",
            MsgKey::NotFileSystem => "This plugin only works with the file system adapter.",
            MsgKey::ErrorSyncing => "Error syncing time",
            MsgKey::ErrorGettingStats => "Error getting file stats.",
            MsgKey::SyncSuccess => "Synced modification time to creation time",
            MsgKey::BatchSuccess => "Done: {success}, Failed: {fail}",
        },
    }
}

/// Renders the batch summary line.
pub fn batch_summary(language: Language, synced: usize, failed: usize) -> String {
    t(language, MsgKey::BatchSuccess)
        .replace("{success}", &synced.to_string())
        .replace("{fail}", &failed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn japanese_locales_are_detected() {
        for locale in ["ja", "ja-jp", "ja_JP.UTF-8", "JA"] {
            assert_eq!(Language::from_locale(locale), Language::Ja, "{locale}");
        }
    }

    #[test]
    fn other_locales_fall_back_to_english() {
        for locale in ["en", "en_US.UTF-8", "de-DE", "", "C"] {
            assert_eq!(Language::from_locale(locale), Language::En, "{locale}");
        }
    }

    #[test]
    fn lookup_follows_language() {
        assert_eq!(t(Language::En, MsgKey::NoFileSelected), "No file selected.");
        assert_eq!(
            t(Language::Ja, MsgKey::NoFileSelected),
            "ファイルが選択されていません。"
        );
    }

    #[test]
    fn batch_summary_fills_both_counters() {
        assert_eq!(batch_summary(Language::En, 7, 2), "Done: 7, Failed: 2");
        assert_eq!(batch_summary(Language::Ja, 0, 3), "完了: 0 件, 失敗: 3 件");
    }
}
