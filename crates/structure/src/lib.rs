//! Text structuring for exhibitor spreadsheet cells.
//!
//! Provides pure functions that turn semi-structured Chinese text into typed
//! containers:
//! - Numbered lists (`1.…\n2.…`)
//! - Categorized product lists (`1.类别：产品、产品`)
//! - VIP product sections (`一、…二、…三、` with `【系列】` entries)
//! - Integer coercion for count cells
//!
//! Nothing here fails. Malformed, empty or `"nan"` input yields an empty
//! container (or 0), and lines that do not match a convention are dropped.

use std::sync::OnceLock;

use regex::Regex;
use vipboard_model::{CellValue, ProductCatalog, VipCategory, VipProduct, VipProducts};

/// How a missing spreadsheet cell is rendered once stringified.
const MISSING_MARKER: &str = "nan";

// Compile-once regex patterns via OnceLock.
fn re_list_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.").unwrap())
}

fn re_category_entry() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Product run stops at the next ASCII digit so the following entry is not swallowed
    RE.get_or_init(|| Regex::new(r"\d+\.\s*([^：]+)：([^0-9]+)").unwrap())
}

fn re_product_delimiter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[，、]").unwrap())
}

fn re_section_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[一二三]、").unwrap())
}

fn re_entry_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\d+\.").unwrap())
}

fn re_series() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"【([^】]+)】").unwrap())
}

/// True for blank cells and the stringified form of a missing cell.
pub fn is_missing(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || text == MISSING_MARKER
}

/// Parse a numbered list, one entry per line.
///
/// Only lines starting with `<digits>.` are kept; the marker is stripped and
/// entries that are empty after trimming are dropped.
pub fn parse_numbered_list(text: &str) -> Vec<String> {
    if is_missing(text) {
        return Vec::new();
    }

    text.split('\n')
        .map(str::trim)
        .filter_map(|line| {
            let marker = re_list_marker().find(line)?;
            let content = line[marker.end()..].trim();
            if content.is_empty() {
                None
            } else {
                Some(content.to_string())
            }
        })
        .collect()
}

/// Parse `<digits>.类别：产品、产品` entries into a category catalog.
///
/// Products are split on `，` or `、`. Categories without products are
/// omitted. A repeated category replaces the earlier product list.
pub fn parse_categorized_products(text: &str) -> ProductCatalog {
    let mut catalog = ProductCatalog::new();
    if is_missing(text) {
        return catalog;
    }

    for caps in re_category_entry().captures_iter(text) {
        let category = caps[1].trim();
        let products = split_products(&caps[2]);
        if !category.is_empty() && !products.is_empty() {
            catalog.insert(category, products);
        }
    }

    catalog
}

fn split_products(text: &str) -> Vec<String> {
    re_product_delimiter()
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse the `一、` / `二、` / `三、` VIP product sections.
///
/// Text before the first marker is discarded. The remaining fragments map
/// positionally onto `New`, `Hot` and `Bestseller`; a fragment with no
/// usable entries is left out of the result.
pub fn parse_vip_product_sections(text: &str) -> VipProducts {
    let mut result = VipProducts::new();
    if is_missing(text) {
        return result;
    }

    let fragments = re_section_marker().split(text).skip(1);
    for (category, fragment) in VipCategory::ALL.iter().zip(fragments) {
        if fragment.trim().is_empty() {
            continue;
        }

        let products: Vec<VipProduct> = re_entry_marker()
            .split(fragment)
            .filter_map(parse_vip_entry)
            .collect();

        if !products.is_empty() {
            result.insert(*category, products);
        }
    }

    result
}

fn parse_vip_entry(entry: &str) -> Option<VipProduct> {
    let entry = entry.trim();
    if entry.is_empty() {
        return None;
    }

    // Series text is kept exactly as written between the brackets
    let series = re_series().captures(entry).map(|caps| caps[1].to_string());

    let without_series = re_series().replace_all(entry, "");
    let without_series = without_series.trim();
    let description = match re_list_marker().find(without_series) {
        Some(marker) => &without_series[marker.end()..],
        None => without_series,
    };
    let description = description
        .trim()
        .trim_start_matches(|c| c == '：' || c == ':')
        .trim();

    if description.is_empty() {
        return None;
    }

    Some(VipProduct {
        series,
        description: description.to_string(),
    })
}

/// Coerce a cell to an integer count.
///
/// Missing, blank, `"nan"` and unparseable cells give 0. Decimal text and
/// fractional numbers are truncated toward zero, so `"2.0"` gives 2.
pub fn safe_int(value: Option<&CellValue>) -> i64 {
    match value {
        None | Some(CellValue::Empty) => 0,
        Some(CellValue::Bool(b)) => i64::from(*b),
        Some(CellValue::Number(n)) => truncate(*n),
        Some(CellValue::Text(s)) => safe_int_str(s),
    }
}

/// String form of [`safe_int`].
pub fn safe_int_str(text: &str) -> i64 {
    if is_missing(text) {
        return 0;
    }
    let text = text.trim();
    if let Ok(n) = text.parse::<i64>() {
        return n;
    }
    text.parse::<f64>().map(truncate).unwrap_or(0)
}

fn truncate(n: f64) -> i64 {
    if n.is_finite() {
        n.trunc() as i64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_numbered_list() {
        assert_eq!(
            parse_numbered_list("1.Alpha\n2.Beta\n3.Gamma"),
            vec!["Alpha", "Beta", "Gamma"]
        );
    }

    #[test]
    fn test_numbered_list_drops_unmarked_lines() {
        assert_eq!(parse_numbered_list("Intro text\n1.Alpha"), vec!["Alpha"]);
        assert_eq!(parse_numbered_list("  12. Spaced \r\n3.\n"), vec!["Spaced"]);
    }

    #[test]
    fn test_numbered_list_missing() {
        assert!(parse_numbered_list("").is_empty());
        assert!(parse_numbered_list("nan").is_empty());
        assert!(parse_numbered_list("no markers here").is_empty());
    }

    #[test]
    fn test_categorized_products() {
        let catalog =
            parse_categorized_products("1.个人产品：电视、空调\n2.商用产品：显示器，中央空调");
        let entries: Vec<_> = catalog.iter().collect();
        assert_eq!(
            entries,
            vec![
                ("个人产品", &["电视".to_string(), "空调".to_string()][..]),
                ("商用产品", &["显示器".to_string(), "中央空调".to_string()][..]),
            ]
        );
    }

    #[test]
    fn test_categorized_products_skips_empty_category() {
        let catalog = parse_categorized_products("1.空类别：、，\n2.家电：冰箱");
        assert_eq!(catalog.categories().collect::<Vec<_>>(), vec!["家电"]);
    }

    #[test]
    fn test_categorized_products_last_write_wins() {
        let catalog = parse_categorized_products("1.家电：冰箱\n2.家电：洗衣机");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("家电"), Some(&["洗衣机".to_string()][..]));
    }

    #[test]
    fn test_categorized_products_missing() {
        assert!(parse_categorized_products("nan").is_empty());
        assert!(parse_categorized_products("电视、空调").is_empty());
    }

    #[test]
    fn test_vip_sections_single_entry() {
        let sections = parse_vip_product_sections("一、\n1.【QM8K】：面板升级");
        let mut expected = VipProducts::new();
        expected.insert(
            VipCategory::New,
            vec![VipProduct::new(Some("QM8K"), "面板升级")],
        );
        assert_eq!(sections, expected);
    }

    #[test]
    fn test_vip_sections_positional() {
        let text = "VIP展区\n一、\n1.【X11K 超大尺寸电视】：14k区控光\n2.无系列的新品\n二、\n\n三、\n1.【新风空调】：市场份额扩大";
        let sections = parse_vip_product_sections(text);

        assert_eq!(
            sections.get(&VipCategory::New),
            Some(&vec![
                VipProduct::new(Some("X11K 超大尺寸电视"), "14k区控光"),
                VipProduct::new(None, "无系列的新品"),
            ])
        );
        assert!(!sections.contains_key(&VipCategory::Hot));
        assert_eq!(
            sections.get(&VipCategory::Bestseller),
            Some(&vec![VipProduct::new(Some("新风空调"), "市场份额扩大")])
        );
    }

    #[test]
    fn test_vip_series_keeps_bracket_text() {
        let sections = parse_vip_product_sections("一、\n1.【 QM8K 】：面板升级\n2.【 】：整机");
        assert_eq!(
            sections.get(&VipCategory::New),
            Some(&vec![
                VipProduct::new(Some(" QM8K "), "面板升级"),
                VipProduct::new(Some(" "), "整机"),
            ])
        );
    }

    #[test]
    fn test_vip_sections_drop_series_only_entries() {
        let sections = parse_vip_product_sections("一、\n1.【只有系列】");
        assert!(sections.is_empty());
        assert!(parse_vip_product_sections("没有分段标记").is_empty());
        assert!(parse_vip_product_sections("nan").is_empty());
    }

    #[test]
    fn test_safe_int() {
        assert_eq!(safe_int(None), 0);
        assert_eq!(safe_int(Some(&CellValue::Empty)), 0);
        assert_eq!(safe_int(Some(&CellValue::Text("".into()))), 0);
        assert_eq!(safe_int(Some(&CellValue::Text("nan".into()))), 0);
        assert_eq!(safe_int(Some(&CellValue::Text("2.0".into()))), 2);
        assert_eq!(safe_int(Some(&CellValue::Text(" 7 ".into()))), 7);
        assert_eq!(safe_int(Some(&CellValue::Text("两个".into()))), 0);
        assert_eq!(safe_int(Some(&CellValue::Number(3.9))), 3);
        assert_eq!(safe_int(Some(&CellValue::Number(f64::NAN))), 0);
        assert_eq!(safe_int(Some(&CellValue::Bool(true))), 1);
        assert_eq!(safe_int_str("inf"), 0);
    }

    proptest! {
        #[test]
        fn structuring_never_panics(text in "\\PC*") {
            let _ = parse_numbered_list(&text);
            let _ = parse_categorized_products(&text);
            let _ = parse_vip_product_sections(&text);
            let _ = safe_int_str(&text);
        }

        #[test]
        fn numbered_list_entries_are_trimmed_and_non_empty(
            items in proptest::collection::vec("[a-z\u{4e00}-\u{4e8f} ]{0,8}", 0..6)
        ) {
            let text = items
                .iter()
                .enumerate()
                .map(|(i, item)| format!("{}.{}", i + 1, item))
                .collect::<Vec<_>>()
                .join("\n");
            let parsed = parse_numbered_list(&text);
            let expected: Vec<String> = items
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            prop_assert_eq!(parsed, expected);
        }

        #[test]
        fn safe_int_reads_integer_text(n in -100_000i64..100_000) {
            prop_assert_eq!(safe_int_str(&n.to_string()), n);
            prop_assert_eq!(safe_int_str(&format!("{}.0", n)), n);
        }
    }
}
