//! Business rules injected into prompts and applied to model output.
//!
//! 1. Linguistic sanitisation of the product name.
//! 2. Dynamic financial anchoring (no template prices).
//! 3. Category awareness: low-tech products get physical moats only.
//! 4. Anti-lazy competitive analysis: no copy-pasted vulnerabilities.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::report::CompetitorEntry;

/// Replacement for a vulnerability text repeated across most competitors.
pub const GENERIC_VULNERABILITY_NOTE: &str =
    "Datos cualitativos insuficientes para perfilado individual";

/// Replacement for digital terms found in low-tech moats.
pub const PHYSICAL_DIFFERENTIATOR_NOTE: &str = "[DIFERENCIADOR FÍSICO REQUERIDO]";

/// Share of identical vulnerabilities above which they are flagged.
const GENERIC_VULNERABILITY_RATIO: f64 = 0.60;

/// Home, organisation, kitchen, storage and garden terms (Spanish and English).
pub const LOW_TECH_CATEGORIES: &[&str] = &[
    "escurridor", "dish rack", "zapatero", "shoe rack", "organizador", "organizer",
    "estantería", "shelf", "perchero", "coat rack", "cesta", "basket", "balde", "bucket",
    "mop", "trapeador", "escoba", "broom", "basurero", "trash can", "papelera",
    "colgador", "hanger", "tendedero", "drying rack", "porta", "holder",
    "tabla de cortar", "cutting board", "colador", "strainer", "rallador", "grater",
    "embudo", "funnel", "espátula", "spatula", "pelador", "peeler",
    "caja de almacenamiento", "storage box", "cajón", "drawer", "repisa", "ledge",
    "soporte", "stand", "base", "pedestal", "paleta", "pallet",
    "maceta", "flowerpot", "rastrillo", "rake", "pala", "shovel", "manguera", "hose",
];

/// Differentiators that make no sense for a low-tech product.
pub const DIGITAL_FORBIDDEN_TERMS: &[&str] = &[
    "app", "aplicación", "software", "ecosistema digital", "plataforma digital",
    "suscripción digital", "cable usb", "cable de datos", "cable reforzado",
    "sistema inteligente", "smart", "iot", "bluetooth", "wifi", "nfc",
    "masterclass virtual", "acceso lifetime app", "dashboard", "api",
];

static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)").expect("valid regex"));

static DASH_SUBTITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+[-–—]+\s+.*$").expect("valid regex"));

static NOISE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(se desc|se de|amazon|fba|asin|nicho|mercado|private label|pl|keyword|search|term)\b",
    )
    .expect("valid regex")
});

static MULTI_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

static FORBIDDEN_TERMS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    DIGITAL_FORBIDDEN_TERMS
        .iter()
        .map(|term| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(term));
            (*term, Regex::new(&pattern).expect("valid regex"))
        })
        .collect()
});

/// Reduce a raw product anchor to its plain generic name.
///
/// Drops parenthesised translations, dash subtitles and marketplace noise.
/// Falls back to the trimmed input when nothing would remain.
pub fn sanitize_product_name(raw: &str) -> String {
    let cleaned = PARENTHESIZED.replace_all(raw, "");
    let cleaned = DASH_SUBTITLE.replace(&cleaned, "");
    let cleaned = NOISE_WORDS.replace_all(&cleaned, "");
    let cleaned = MULTI_SPACE.replace_all(&cleaned, " ");
    let cleaned = cleaned
        .trim()
        .trim_end_matches(['.', ',', ';', ':'])
        .trim()
        .to_string();

    if cleaned.is_empty() {
        return raw.trim().to_string();
    }
    if cleaned != raw {
        debug!(raw = %raw, cleaned = %cleaned, "Sanitized product name");
    }
    cleaned
}

/// Whether the description names a home/organisation/low-tech product.
pub fn is_low_tech_product(description: &str) -> bool {
    let lower = description.to_lowercase();
    LOW_TECH_CATEGORIES.iter().any(|term| lower.contains(term))
}

/// Render the four-rule system block placed at the top of every prompt.
pub fn system_rules_block(description: &str, avg_price: Option<f64>) -> String {
    let price_anchor = match avg_price {
        Some(price) if price > 0.0 => format!("${:.2}", price),
        _ => "el precio promedio/mediana real del nicho".to_string(),
    };

    let category_rule = if is_low_tech_product(description) {
        format!(
            r#"[REGLA 3: CONCIENCIA DE CATEGORÍA (LOW-TECH DETECTADO)]
- El producto "{description}" pertenece a Hogar / Organización / Low-Tech.
- PROHIBIDO proponer como diferenciador: apps, software, plataformas o ecosistemas digitales,
  cables de cualquier tipo, funciones smart / IoT / Bluetooth / WiFi, suscripciones digitales,
  masterclasses virtuales o dashboards.
- La propuesta de valor DEBE ser física: acero inoxidable de mayor grado (304/316), madera
  sólida certificada, diseño modular, empaque anti-roturas, tratamiento anticorrosión,
  garantía física extendida (3-5 años), acabados premium."#
        )
    } else {
        r#"[REGLA 3: CONCIENCIA DE CATEGORÍA]
- Analiza la naturaleza física del producto antes de proponer moats.
- Si es un producto de hogar, organización o utensilio, no sugieras apps, software ni cables.
- La propuesta de valor debe ser coherente con la categoría física del producto."#
            .to_string()
    };

    format!(
        r#"=== INSTRUCCIONES DEL SISTEMA: REGLAS ESTRICTAS ===
Incumplir estas reglas es un fallo crítico.

[REGLA 1: SANITIZACIÓN LINGÜÍSTICA]
- El producto a analizar es: "{description}"
- Usa solo el nombre genérico y natural del producto, sin paréntesis, traducciones ni códigos.

[REGLA 2: ANCLAJE FINANCIERO DINÁMICO]
- El precio de referencia del nicho es: {price_anchor}
- Todo cálculo de precio, margen o escenario debe basarse en ese precio.
- No inventes precios de plantilla ni márgenes de relleno.
- Si faltan datos logísticos escribe exactamente: "Datos logísticos insuficientes para un cálculo de margen exacto"

{category_rule}

[REGLA 4: ANÁLISIS COMPETITIVO ANTI-PEREZA]
- Cada competidor recibe una vulnerabilidad propia basada en sus métricas (precio, rating, reseñas).
- Prohibido repetir la misma frase en varias filas.
- Si no hay datos suficientes escribe exactamente: "{GENERIC_VULNERABILITY_NOTE}"
=== FIN DE INSTRUCCIONES DEL SISTEMA ==="#
    )
}

/// Replace a vulnerability repeated across most competitors with a note.
///
/// Returns `true` when entries were rewritten.
pub fn flag_generic_vulnerabilities(products: &mut [CompetitorEntry]) -> bool {
    let normalized: Vec<String> = products
        .iter()
        .map(|p| p.vulnerability.trim().to_lowercase())
        .collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for vuln in normalized.iter().filter(|v| !v.is_empty()) {
        *counts.entry(vuln.as_str()).or_default() += 1;
    }
    let total: usize = counts.values().sum();
    let Some((most_common, count)) = counts.into_iter().max_by_key(|(_, c)| *c) else {
        return false;
    };

    if (count as f64) / (total as f64) <= GENERIC_VULNERABILITY_RATIO {
        return false;
    }

    warn!(
        vulnerability = %most_common,
        count,
        total,
        "Generic vulnerability repeated across competitors, flagging"
    );
    let most_common = most_common.to_string();
    for (product, vuln) in products.iter_mut().zip(&normalized) {
        if *vuln == most_common {
            product.vulnerability = GENERIC_VULNERABILITY_NOTE.to_string();
        }
    }
    true
}

/// Strip digital differentiators from moat text of a low-tech product.
pub fn scrub_low_tech_moat(text: &str, description: &str) -> String {
    if !is_low_tech_product(description) {
        return text.to_string();
    }

    let mut corrected = text.to_string();
    let mut replaced = Vec::new();
    for (term, pattern) in FORBIDDEN_TERMS.iter() {
        if pattern.is_match(&corrected) {
            corrected = pattern
                .replace_all(&corrected, PHYSICAL_DIFFERENTIATOR_NOTE)
                .into_owned();
            replaced.push(*term);
        }
    }

    if !replaced.is_empty() {
        warn!(?replaced, "Digital moat suggested for low-tech product");
    }
    corrected
}

/// Apply the output rules to the competitor matrix of a model answer.
pub fn enforce_competitor_rules(products: &mut [CompetitorEntry], description: &str) {
    flag_generic_vulnerabilities(products);
    for product in products.iter_mut() {
        product.advantage = scrub_low_tech_moat(&product.advantage, description);
        product.gap = scrub_low_tech_moat(&product.gap, description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Provenance;

    fn entry(rank: u32, vuln: &str) -> CompetitorEntry {
        CompetitorEntry {
            rank,
            name: format!("Brand {}", rank),
            price: 20.0,
            reviews: 100,
            rating: 4.2,
            advantage: "Durable".to_string(),
            vulnerability: vuln.to_string(),
            gap: "Colors".to_string(),
            provenance: Provenance::Estimated,
        }
    }

    #[test]
    fn test_sanitize_strips_translation_and_noise() {
        assert_eq!(
            sanitize_product_name("escurridores de platos (Dish Drying Rack) se desc"),
            "escurridores de platos"
        );
        assert_eq!(sanitize_product_name("ZAPATERO (Shoe Rack) - Amazon FBA"), "ZAPATERO");
    }

    #[test]
    fn test_sanitize_keeps_hyphenated_words() {
        assert_eq!(sanitize_product_name("Anti-slip bath mat."), "Anti-slip bath mat");
    }

    #[test]
    fn test_sanitize_falls_back_to_original() {
        assert_eq!(sanitize_product_name("  (Amazon) "), "(Amazon)");
        assert_eq!(sanitize_product_name(""), "");
    }

    #[test]
    fn test_low_tech_detection() {
        assert!(is_low_tech_product("Bamboo Cutting Board"));
        assert!(is_low_tech_product("Organizador de zapatos"));
        assert!(!is_low_tech_product("Smart AI Baby Monitor"));
    }

    #[test]
    fn test_rules_block_variants() {
        let low_tech = system_rules_block("Dish Rack", Some(34.5));
        assert!(low_tech.contains("LOW-TECH DETECTADO"));
        assert!(low_tech.contains("$34.50"));

        let general = system_rules_block("Wireless Earbuds", None);
        assert!(!general.contains("LOW-TECH DETECTADO"));
        assert!(general.contains("el precio promedio/mediana real del nicho"));
    }

    #[test]
    fn test_flag_generic_vulnerabilities_above_threshold() {
        let mut products: Vec<_> = (1..=10).map(|i| entry(i, "Precio alto")).collect();
        products[0].vulnerability = "Pocas reseñas".to_string();
        products[1].vulnerability = "Garantía corta".to_string();
        products[2].vulnerability = "  PRECIO ALTO ".to_string();

        assert!(flag_generic_vulnerabilities(&mut products));
        assert_eq!(products[0].vulnerability, "Pocas reseñas");
        assert_eq!(products[2].vulnerability, GENERIC_VULNERABILITY_NOTE);
        assert_eq!(products[9].vulnerability, GENERIC_VULNERABILITY_NOTE);
    }

    #[test]
    fn test_flag_generic_vulnerabilities_at_threshold_is_kept() {
        // 6 of 10 is exactly 60%, not above it.
        let mut products: Vec<_> = (1..=10).map(|i| entry(i, "Repetida")).collect();
        for (i, p) in products.iter_mut().enumerate().take(4) {
            p.vulnerability = format!("Única {}", i);
        }
        assert!(!flag_generic_vulnerabilities(&mut products));
        assert_eq!(products[9].vulnerability, "Repetida");
    }

    #[test]
    fn test_flag_ignores_empty_matrix() {
        let mut products: Vec<CompetitorEntry> = Vec::new();
        assert!(!flag_generic_vulnerabilities(&mut products));
    }

    #[test]
    fn test_scrub_low_tech_moat() {
        let text = "Incluye app de seguimiento y conexión Bluetooth";
        let scrubbed = scrub_low_tech_moat(text, "Shoe Rack de bambú");
        assert!(!scrubbed.contains("app "));
        assert!(!scrubbed.to_lowercase().contains("bluetooth"));
        assert!(scrubbed.contains(PHYSICAL_DIFFERENTIATOR_NOTE));

        // Word boundaries: "rapid" is not "api"
        assert_eq!(scrub_low_tech_moat("Secado rapido", "Dish Rack"), "Secado rapido");
        // Tech products are untouched
        assert_eq!(scrub_low_tech_moat(text, "Smart Watch"), text);
    }
}
