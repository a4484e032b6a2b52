//! Embedded keymap tables.
//!
//! The baseline table holds the ZIE default for every remappable key and is
//! emitted in this order. The vendor map translates PCOMM key names onto
//! baseline identifiers.

/// ZIE baseline keymap: `(key, default value)` pairs in output order.
pub const BASELINE_KEYMAP: &[(&str, &str)] = &[
    ("B27", "[clear]"),
    ("M86", "55"),
    ("T16777232", "16777232"),
    ("C127", "[deleteword]"),
    ("S33554442", "[newline]"),
    ("T16777234", "16777234"),
    ("T16777233", "16777233"),
    ("S40", "[markdown]"),
    ("B155", "[insert]"),
    ("C120", "[cursel]"),
    ("B33", "[pageup]"),
    ("B34", "[pagedn]"),
    ("B35", "[eof]"),
    ("S127", "53"),
    ("M90", "|206"),
    ("B36", "[home]"),
    ("B37", "[left]"),
    ("B38", "[up]"),
    ("B39", "[right]"),
    ("keyVersion", "2"),
    ("B8", "[backspace]"),
    ("B9", "[tab]"),
    ("B40", "[down]"),
    ("C33554559", "[deleteword]"),
    ("C65", "57"),
    ("C67", "54"),
    ("S9", "[backtab]"),
    ("T16777373", "16777373"),
    ("A123", "[+cr]"),
    ("B33554587", "[insert]"),
    ("B33554466", "[pagedn]"),
    ("B33554467", "[eof]"),
    ("B33554465", "[pageup]"),
    ("B33554468", "[home]"),
    ("sessionType", "1"),
    ("codePage", "037"),
    ("C74", "49"),
    ("C77", "|26"),
    ("S33554559", "53"),
    ("B226", "[left]"),
    ("B227", "[right]"),
    ("B224", "[up]"),
    ("B225", "[down]"),
    ("C155", "54"),
    ("S155", "55"),
    ("T16", "16"),
    ("C80", "|35"),
    ("T18", "18"),
    ("T17", "17"),
    ("C82", "|62"),
    ("C81", "51"),
    ("C83", "|11"),
    ("C86", "55"),
    ("C85", "|24"),
    ("C88", "53"),
    ("B118", "[pf7]"),
    ("B119", "[pf8]"),
    ("B116", "[pf5]"),
    ("B117", "[pf6]"),
    ("B114", "[pf3]"),
    ("C16777233", "[enterreset]"),
    ("B115", "[pf4]"),
    ("B112", "[pf1]"),
    ("B113", "[pf2]"),
    ("C33554467", "[backtabword]"),
    ("B33554442", "[enter]"),
    ("C33554468", "[rule]"),
    ("C33554465", "49"),
    ("C33554466", "[tabword]"),
    ("C33554587", "54"),
    ("T157", "157"),
    ("C90", "|206"),
    ("XF:[textlogicaldisp]", "[textlogicaldisp]"),
    ("autoApply", "false"),
    ("C17", "[enterreset]"),
    ("B127", "[delete]"),
    ("B123", "[pf12]"),
    ("B121", "[pf10]"),
    ("B122", "[pf11]"),
    ("XF:[textvisualdisp]", "[textvisualdisp]"),
    ("S10", "[newline]"),
    ("B120", "[pf9]"),
    ("S119", "[pf20]"),
    ("S117", "[pf18]"),
    ("S118", "[pf19]"),
    ("S115", "[pf16]"),
    ("S116", "[pf17]"),
    ("S113", "[pf14]"),
    ("S114", "[pf15]"),
    ("S33554468", "[fieldmark]"),
    ("C227", "[moveright]"),
    ("C226", "[moveleft]"),
    ("C225", "[movedown]"),
    ("S33554587", "55"),
    ("C224", "[moveup]"),
    ("M67", "54"),
    ("S122", "[pf23]"),
    ("S123", "[pf24]"),
    ("S27", "[unmark]"),
    ("S120", "[pf21]"),
    ("disableKeyBuffer", "false"),
    ("S121", "[pf22]"),
    ("B10", "[enter]"),
    ("S227", "[markright]"),
    ("C33", "49"),
    ("C35", "[backtabword]"),
    ("S225", "[markdown]"),
    ("S226", "[markleft]"),
    ("C34", "|235"),
    ("C37", "[moveleft]"),
    ("C36", "[rule]"),
    ("S224", "[markup]"),
    ("C39", "[moveright]"),
    ("C38", "[moveup]"),
    ("C119", "[aplkbd]"),
    ("B19", "[clear]"),
    ("B33554559", "[delete]"),
    ("S37", "[markleft]"),
    ("S36", "[fieldmark]"),
    ("S39", "[markright]"),
    ("S112", "[pf13]"),
    ("S38", "[markup]"),
    ("C40", "[movedown]"),
];

/// PCOMM key identifier to ZIE baseline key identifier.
pub const VENDOR_KEY_MAP: &[(&str, &str)] = &[
    ("KEY112", "B112"),
    ("KEY113", "B113"),
    ("KEY114", "B114"),
    ("KEY115", "B115"),
    ("KEY116", "B116"),
    ("KEY117", "B117"),
    ("KEY118", "B118"),
    ("KEY119", "B119"),
    ("KEY120", "B120"),
    ("KEY121", "B121"),
    ("KEY122", "B122"),
    ("KEY123", "B123"),
];

/// Looks up the baseline key a vendor key remaps to.
pub fn map_vendor_key(vendor_key: &str) -> Option<&'static str> {
    VENDOR_KEY_MAP
        .iter()
        .find(|(vendor, _)| *vendor == vendor_key)
        .map(|(_, baseline)| *baseline)
}

/// Returns the baseline default for `key`, if the key is part of the table.
pub fn baseline_default(key: &str) -> Option<&'static str> {
    BASELINE_KEYMAP
        .iter()
        .find(|(baseline, _)| *baseline == key)
        .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_baseline_keys_are_unique() {
        let keys: HashSet<_> = BASELINE_KEYMAP.iter().map(|(key, _)| *key).collect();
        assert_eq!(keys.len(), BASELINE_KEYMAP.len());
        assert_eq!(BASELINE_KEYMAP.len(), 123);
    }

    #[test]
    fn test_every_vendor_mapping_targets_baseline_key() {
        for (vendor, baseline) in VENDOR_KEY_MAP {
            assert!(
                baseline_default(baseline).is_some(),
                "{vendor} maps to {baseline}, which is missing from the baseline"
            );
        }
    }

    #[test]
    fn test_map_vendor_key() {
        assert_eq!(map_vendor_key("KEY112"), Some("B112"));
        assert_eq!(map_vendor_key("KEY123"), Some("B123"));
        assert_eq!(map_vendor_key("KEY124"), None);
        assert_eq!(map_vendor_key("key112"), None);
    }

    #[test]
    fn test_baseline_default_lookup() {
        assert_eq!(baseline_default("B27"), Some("[clear]"));
        assert_eq!(baseline_default("S40"), Some("[markdown]"));
        assert_eq!(baseline_default("codePage"), Some("037"));
        assert_eq!(baseline_default("XF:[textvisualdisp]"), Some("[textvisualdisp]"));
        assert_eq!(baseline_default("NOPE"), None);
    }
}
