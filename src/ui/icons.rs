//! Shared UI icons and emojis.

use console::Emoji;

pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static SCALES: Emoji<'_, '_> = Emoji("⚖️  ", "");
pub static GAVEL: Emoji<'_, '_> = Emoji("🔨 ", "");
pub static BELL: Emoji<'_, '_> = Emoji("🔔 ", "[!]");
pub static NOTE: Emoji<'_, '_> = Emoji("📝 ", "~");
pub static DOCS: Emoji<'_, '_> = Emoji("📄 ", "+");
pub static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[R]");
