//! Deterministic rule-based extractor.
//!
//! Serves as the fallback when no model credential is configured or the model
//! call fails. Matching is case-insensitive substring matching over ordered
//! tables. Table order is load-bearing: entries are evaluated top to bottom
//! and the first satisfied entry wins, so specific labels must stay listed
//! before generic catch-alls.

use crate::extraction::ExtractedRecord;

/// Sentinel for a field the text is clearly about but never names.
/// Distinct from `None`, which means the text gave no signal at all.
pub const UNKNOWN_FISH: &str = "未知鱼种";
pub const UNKNOWN_BAIT: &str = "未知鱼饵";
pub const UNKNOWN_ROD: &str = "未知鱼竿";

/// Rod label assumed when the text names a lure-type bait but no rod.
pub const LURE_ROD_LABEL: &str = "路亚竿";

/// Known species tokens. First literal substring match wins, not longest.
const SPECIES: &[&str] = &[
    "鲫鱼", "鲤鱼", "草鱼", "鲈鱼", "黑鱼", "青鱼", "鳊鱼", "翘嘴", "鲶鱼", "黄颡鱼", "罗非鱼",
    "鳜鱼", "桂鱼", "白条", "马口",
];

/// Bait table: (label, patterns). Named products and lure sub-types come
/// before the generic catch-alls.
const BAIT_TABLE: &[(&str, &[&str])] = &[
    ("蚯蚓", &["蚯蚓"]),
    ("红虫", &["红虫"]),
    ("玉米", &["玉米"]),
    ("麦粒", &["麦粒"]),
    ("商品饵", &["商品饵", "九一八", "蓝鲫", "螺鲤"]),
    ("米诺", &["米诺"]),
    ("亮片", &["亮片"]),
    ("软虫", &["软虫"]),
    ("铅笔", &["铅笔"]),
    ("波爬", &["波爬", "波扒"]),
    ("vib", &["vib"]),
    ("路亚饵", &["路亚饵", "假饵", "拟饵"]),
    ("鱼饵", &["鱼饵", "饵料"]),
];

/// Lure-type signals that trigger the rod inference. The bare "路亚" token
/// lives here and NOT in the rod table, so a text like "用米诺路亚" resolves
/// through inference rather than a direct rod match.
const LURE_SIGNALS: &[&str] = &["米诺", "亮片", "软虫", "铅笔", "波爬", "波扒", "vib", "路亚"];

const ROD_TABLE: &[(&str, &[&str])] = &[
    ("手竿", &["手竿", "台钓"]),
    ("海竿", &["海竿", "抛竿", "矶竿"]),
    ("筏竿", &["筏竿"]),
    ("路亚竿", &["路亚竿"]),
    ("飞蝇竿", &["飞蝇竿", "飞钓"]),
];

/// Direct environment vocabulary: weather, wind, water clarity, current,
/// depth, bank proximity, water-body type.
const ENV_TABLE: &[(&str, &[&str])] = &[
    ("晴天", &["晴天", "天晴", "晴朗"]),
    ("阴天", &["阴天"]),
    ("雨天", &["雨天", "下雨", "有雨"]),
    ("夜钓", &["夜钓", "晚上"]),
    ("微风", &["微风"]),
    ("大风", &["大风", "风很大"]),
    ("水质清澈", &["清澈", "水很清"]),
    ("水质浑浊", &["浑浊", "水很浑"]),
    ("水流湍急", &["湍急", "急流"]),
    ("水流平缓", &["平缓", "缓流"]),
    ("深水", &["深水", "水深", "水很深"]),
    ("浅水", &["浅水", "水浅", "水很浅"]),
    ("近岸", &["近岸", "岸边"]),
    ("水库", &["水库"]),
    ("池塘", &["池塘", "鱼塘", "黑坑"]),
    ("桥墩", &["桥墩", "桥下"]),
];

/// Broad relevance signals: a field only falls back to its unknown sentinel
/// when at least one of these appears in the text.
const FISHING_TOKENS: &[&str] = &["钓", "鱼", "竿", "饵", "路亚", "打窝", "渔"];

/// Maps free text to the four semantic fields. Never fails; every field is
/// either a specific label, an unknown sentinel, or `None`.
pub fn extract_rule_based(text: &str) -> ExtractedRecord {
    let text = text.to_lowercase();

    let fish_type = SPECIES
        .iter()
        .find(|species| text.contains(*species))
        .map(|s| (*s).to_string());

    let bait = first_match(BAIT_TABLE, &text);

    let rod = first_match(ROD_TABLE, &text).or_else(|| {
        LURE_SIGNALS
            .iter()
            .any(|signal| text.contains(signal))
            .then(|| LURE_ROD_LABEL.to_string())
    });

    let environment = extract_environment(&text);

    let relevant = FISHING_TOKENS.iter().any(|token| text.contains(token));
    let sentinel = |value: Option<String>, unknown: &str| {
        value.or_else(|| relevant.then(|| unknown.to_string()))
    };

    ExtractedRecord {
        fish_type: sentinel(fish_type, UNKNOWN_FISH),
        bait: sentinel(bait, UNKNOWN_BAIT),
        rod: sentinel(rod, UNKNOWN_ROD),
        environment,
    }
}

fn first_match(table: &[(&str, &[&str])], text: &str) -> Option<String> {
    table
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|p| text.contains(p)))
        .map(|(label, _)| (*label).to_string())
}

/// Collects every matched environment label, deduplicated in discovery order,
/// joined with ", ". Returns `None` when nothing matched — the environment
/// field has no unknown sentinel.
fn extract_environment(text: &str) -> Option<String> {
    let mut labels: Vec<String> = Vec::new();

    for (label, patterns) in ENV_TABLE {
        if patterns.iter().any(|p| text.contains(p)) {
            push_unique(&mut labels, label);
        }
    }

    supplement_weather(text, &mut labels);

    if labels.is_empty() {
        None
    } else {
        Some(labels.join(", "))
    }
}

/// Keyword-triggered rules: a domain word (天气/风/水质/水流) plus a polarity
/// or intensity word appends the corresponding label.
fn supplement_weather(text: &str, labels: &mut Vec<String>) {
    if text.contains("天气") {
        if text.contains('晴') {
            push_unique(labels, "晴天");
        }
        if text.contains('阴') {
            push_unique(labels, "阴天");
        }
        if text.contains('雨') {
            push_unique(labels, "雨天");
        }
    }

    if text.contains('风') {
        if text.contains("微风") || text.contains("小风") || text.contains("风小") {
            push_unique(labels, "微风");
        }
        if text.contains("大风") || text.contains("风大") || text.contains("强风") {
            push_unique(labels, "大风");
        }
    }

    if text.contains("水质") {
        if text.contains('清') {
            push_unique(labels, "水质清澈");
        }
        if text.contains('浑') || text.contains('混') {
            push_unique(labels, "水质浑浊");
        }
    }

    if text.contains("水流") {
        if text.contains('急') || text.contains('湍') {
            push_unique(labels, "水流湍急");
        }
        if text.contains('缓') || text.contains('平') {
            push_unique(labels, "水流平缓");
        }
    }
}

fn push_unique(labels: &mut Vec<String>, label: &str) {
    if !labels.iter().any(|l| l == label) {
        labels.push(label.to_string());
    }
}
