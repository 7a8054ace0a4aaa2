//! Fixed narrative templates for synthesized reports.
//!
//! Every function here is deterministic given the context.

use std::collections::BTreeMap;

use crate::report::{
    AttentionIdea, CompetitorGap, ContentOpportunities, EmotionalAnalysis, Keyword, MarketShare,
    PainKeyword, SalesIntelligence, ScholarFinding, SeasonalPeak, Seasonality, SeoIdea,
    SocialListening, Trend,
};

pub const BRAND_PREFIXES: [&str; 10] = [
    "Pro", "Elite", "Prime", "Ultra", "Max", "Advanced", "Premium", "Essential", "Pure", "Vital",
];

pub const BRAND_SUFFIXES: [&str; 10] = [
    "Plus", "Pro", "X", "360", "Max", "One", "Classic", "Series", "Edition", "Gold",
];

/// One distinct weakness per rank so no row repeats another.
pub const VULNERABILITIES: [&str; 10] = [
    "Precio premium difícil de justificar frente a marcas emergentes.",
    "Reseñas recientes señalan caída en el control de calidad.",
    "Catálogo amplio pero sin un producto estrella claro.",
    "Empaque genérico que no comunica valor en el unboxing.",
    "Servicio post-venta lento según quejas recurrentes.",
    "Instrucciones de uso confusas y sin versión en español.",
    "Disponibilidad irregular con roturas de stock en temporada alta.",
    "Garantía corta comparada con el promedio de la categoría.",
    "Marca poco reconocida con baja recompra.",
    "Diferenciación débil: compite casi solo por precio.",
];

/// Values the synthesized text is interpolated with.
#[derive(Debug, Clone)]
pub struct TemplateContext {
    /// Primary token, e.g. `Toothbrush`.
    pub base: String,
    /// Second token or `Home`.
    pub secondary: String,
    pub niche_name: String,
}

impl TemplateContext {
    fn base_lower(&self) -> String {
        self.base.to_lowercase()
    }
}

pub fn brand_name(index: usize, base: &str) -> String {
    format!(
        "{} {} {}",
        BRAND_PREFIXES[index],
        base,
        BRAND_SUFFIXES[(index + 3) % BRAND_SUFFIXES.len()]
    )
}

pub fn advantage(index: usize) -> String {
    format!(
        "Líder en {} market fit con alta calidad y reviews positivas.",
        BRAND_PREFIXES[index].to_lowercase()
    )
}

pub fn gap(ctx: &TemplateContext) -> String {
    format!(
        "Oportunidad de personalización y valor agregado en el segmento {}.",
        ctx.base_lower()
    )
}

pub fn social_listening(ctx: &TemplateContext, competitors: &[String]) -> SocialListening {
    let base = &ctx.base;
    let lower = ctx.base_lower();

    SocialListening {
        amazon_review_audit: format!(
            "Análisis forense de reseñas en la categoría {}. Tendencias principales identificadas.",
            ctx.niche_name
        ),
        pros: strings(&[
            "Calidad de materiales consistente en líderes de mercado",
            "Precios competitivos en el rango medio",
            "Buenas valoraciones promedio (4.3+)",
            "Envío Prime disponible en la mayoría",
            "Variedad de opciones para diferentes necesidades",
        ]),
        cons: strings(&[
            "Falta de diferenciación clara entre competidores",
            "Inconsistencia en tamaños o especificaciones",
            "Servicio post-venta limitado",
            "Empaque genérico en muchos casos",
            "Falta de certificaciones de calidad",
        ]),
        emotional_analysis: EmotionalAnalysis {
            frustration: format!("Compradores cansados de {} que fallan a las pocas semanas.", lower),
            desire: format!("Un {} confiable que cumpla lo que promete sin letra pequeña.", lower),
            humor: format!("Memes sobre la distancia entre la foto del anuncio y el {} real.", lower),
            nostalgia: "Extrañan productos simples y duraderos de generaciones anteriores.".to_string(),
            skepticism: "Desconfían de reseñas infladas y promesas de marketing sin pruebas.".to_string(),
        },
        pain_keywords: vec![
            pain_keyword(format!("{} que no se rompa", lower), "High", "Transactional", "Niche Gap"),
            pain_keyword(format!("best {} 2026", lower), "Rising", "Informational", "SEO Target"),
            pain_keyword(format!("{} problemas comunes", lower), "Medium", "Investigational", "Content Gap"),
            pain_keyword(format!("{} garantía larga", lower), "Medium", "Transactional", "Trust Signal"),
            pain_keyword(format!("how to fix {}", lower), "High", "Problem-Solving", "Tutorial Content"),
        ],
        competitor_gaps: competitors
            .iter()
            .take(crate::report::COMPETITOR_GAP_COUNT)
            .zip([
                ("Durabilidad por debajo de lo anunciado", "Duró dos meses y el soporte no responde"),
                ("Atención al cliente sin soporte en español", "Nadie me explica cómo usarlo bien"),
                ("Precio inflado frente a la calidad real", "Pagué de más por una marca, no por calidad"),
            ])
            .map(|(competitor, (issue, frustration))| CompetitorGap {
                competitor: competitor.clone(),
                ignored_issue: issue.to_string(),
                user_frustration: frustration.to_string(),
            })
            .collect(),
        white_space_topics: vec![
            format!("Guías de mantenimiento de {}", lower),
            format!("{} para uso profesional intensivo", base),
            format!("Kits de {} con accesorios incluidos", lower),
            "Comparativas honestas sin afiliados".to_string(),
            "Opciones sostenibles con empaque reciclable".to_string(),
        ],
        cultural_vibe: "Comunidad pragmática que premia la transparencia y castiga el marketing exagerado."
            .to_string(),
        tiktok_trends: format!(
            "Tendencias en #{}TikTok con millones de vistas. UGC dominando la conversión.",
            base.replace(' ', "")
        ),
        reddit_insights: "Comunidades de Reddit discuten pros y contras. Alta demanda de transparencia."
            .to_string(),
        youtube_search_gaps: format!(
            "Pocas comparativas actualizadas de {} en español; reviews de largo plazo casi inexistentes.",
            lower
        ),
        google_search_insights: format!("Crecimiento en búsquedas de 'best {}' y variantes.", lower),
        consumer_desire: "Mejor calidad, precios justos y marcas con propósito.".to_string(),
    }
}

pub fn content_opportunities(ctx: &TemplateContext) -> ContentOpportunities {
    let lower = ctx.base_lower();

    ContentOpportunities {
        garyvee_style: vec![
            AttentionIdea {
                idea: format!("La verdad que nadie cuenta sobre los {} baratos", lower),
                format: "Rant Video 60s".to_string(),
                hook: format!("Tu {} de oferta te está costando el doble", lower),
                emotional_trigger: "Indignación".to_string(),
            },
            AttentionIdea {
                idea: format!("Probé 5 {} durante 30 días", lower),
                format: "Storytelling / Serie".to_string(),
                hook: "Solo uno sobrevivió a la prueba".to_string(),
                emotional_trigger: "Curiosidad".to_string(),
            },
            AttentionIdea {
                idea: format!("Expectativa vs realidad: {}", ctx.base),
                format: "Debate POV".to_string(),
                hook: "Lo que el anuncio no te mostró".to_string(),
                emotional_trigger: "Humor / Identificación".to_string(),
            },
        ],
        patel_style: vec![
            SeoIdea {
                idea: format!("Guía completa: mejores {} 2026", lower),
                target_keyword: format!("best {} 2026", lower),
                search_intent: "Comparison".to_string(),
                content_gap: "No existe una guía actualizada sin afiliados obvios".to_string(),
            },
            SeoIdea {
                idea: format!("Cómo elegir un {} en 5 pasos", lower),
                target_keyword: format!("how to choose {}", lower),
                search_intent: "Tutorial".to_string(),
                content_gap: "El contenido existente es genérico y desactualizado".to_string(),
            },
            SeoIdea {
                idea: format!("Errores comunes al usar {}", lower),
                target_keyword: format!("{} mistakes", lower),
                search_intent: "Educational".to_string(),
                content_gap: "Falta contenido técnico pero accesible".to_string(),
            },
        ],
    }
}

pub fn trends() -> Vec<Trend> {
    [
        ("Personalización Masiva", "Los consumidores buscan productos adaptados a sus necesidades específicas."),
        ("Sostenibilidad", "Creciente demanda por materiales eco-friendly y empaques reciclables."),
        ("Transparencia de Ingredientes", "El consumidor exige saber exactamente qué contiene el producto."),
        ("Experiencia Premium", "Disposición a pagar más por experiencias de unboxing y servicio excepcional."),
    ]
    .into_iter()
    .map(|(title, description)| Trend {
        title: title.to_string(),
        description: description.to_string(),
    })
    .collect()
}

pub fn keywords(ctx: &TemplateContext) -> Vec<Keyword> {
    let base = &ctx.base;
    [
        (format!("Best {}", base), "Alto", "Trending Up", "Commercial", "High"),
        (format!("{} Premium", base), "Medio", "Stable", "Transactional", "Medium"),
        (format!("{} for {}", base, ctx.secondary), "Alto", "Rising", "Transactional", "Medium"),
        (format!("Top Rated {}", base), "Medio", "Steady", "Commercial", "High"),
        (format!("{} Reviews", base), "Alto", "Stable", "Informational", "Medium"),
        (format!("Affordable {}", base), "Medio", "High Demand", "Transactional", "Low"),
        (format!("{} Comparison", base), "Bajo", "Emerging", "Commercial", "Low"),
        (format!("Professional {}", base), "Medio", "Rising", "Transactional", "Medium"),
        (format!("{} 2026", base), "Alto", "Trending Up", "Informational", "Medium"),
        (format!("{} Guide", base), "Bajo", "Stable", "Informational", "Low"),
    ]
    .into_iter()
    .map(|(term, volume, trend, intent, difficulty)| Keyword {
        term,
        volume: volume.to_string(),
        trend: trend.to_string(),
        intent: intent.to_string(),
        difficulty: difficulty.to_string(),
    })
    .collect()
}

pub fn sales_intelligence() -> SalesIntelligence {
    let market_share_by_brand = [
        (format!("{} Brand", BRAND_PREFIXES[0]), 30.0, "Líder"),
        (format!("{} Brand", BRAND_PREFIXES[1]), 25.0, "Retador"),
        (format!("{} Brand", BRAND_PREFIXES[2]), 20.0, "Establecido"),
        ("Otras Marcas".to_string(), 15.0, "Fragmentado"),
        ("NEXUS Opportunity".to_string(), 10.0, "Potencial"),
    ]
    .into_iter()
    .map(|(brand, share, status)| MarketShare {
        brand,
        share,
        status: status.to_string(),
    })
    .collect();

    let sub_category_distribution = BTreeMap::from([
        ("Segmento Premium".to_string(), 35.0),
        ("Segmento Medio".to_string(), 40.0),
        ("Segmento Entry-Level".to_string(), 25.0),
    ]);

    SalesIntelligence {
        market_share_by_brand,
        sub_category_distribution,
        seasonality: Seasonality {
            peaks: vec![
                peak("Noviembre", "Black Friday", "Extreme"),
                peak("Diciembre", "Holiday Season", "High"),
                peak("Julio", "Prime Day", "High"),
            ],
            low_points: strings(&["Enero-Febrero (Post-Holiday)"]),
            strategy_insight:
                "Concentrar inventario para Q4. Oportunidad en Prime Day para penetración de mercado."
                    .to_string(),
        },
    }
}

pub fn sentiment_summary(ctx: &TemplateContext) -> String {
    format!(
        "Análisis de sentimiento para {}: mercado competitivo con oportunidades de diferenciación. \
         El consumidor busca calidad consistente y valor agregado.",
        ctx.niche_name
    )
}

pub fn scholar_audit() -> Vec<ScholarFinding> {
    vec![
        ScholarFinding {
            source: "Market Analysis Quarterly".to_string(),
            finding: "La diferenciación por experiencia de usuario es el factor #1 de retención.".to_string(),
            relevance: "Competitive Strategy".to_string(),
        },
        ScholarFinding {
            source: "Consumer Behavior Journal".to_string(),
            finding: "El 70% de las decisiones de compra se toman basadas en reseñas y UGC.".to_string(),
            relevance: "Marketing Focus".to_string(),
        },
    ]
}

fn pain_keyword(keyword: String, volume: &str, intent: &str, opportunity: &str) -> PainKeyword {
    PainKeyword {
        keyword,
        volume: volume.to_string(),
        search_intent: intent.to_string(),
        opportunity: opportunity.to_string(),
    }
}

fn peak(month: &str, event: &str, impact: &str) -> SeasonalPeak {
    SeasonalPeak {
        month: month.to_string(),
        event: event.to_string(),
        impact: impact.to_string(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
