use serde::{Deserialize, Serialize};

use crate::domain::sector::record::keys;
use crate::domain::sector::{Dataset, SectorRecord};
use crate::enums::ViewId;
use crate::shared::text::format_count;
use crate::shared::view_config::ViewConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightLevel {
    Info,
    Warn,
    Danger,
}

/// One alert shown in the insights drawer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub level: InsightLevel,
    pub text: String,
}

impl Insight {
    fn new(level: InsightLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

fn ratio(value: f64, baseline: f64) -> f64 {
    if baseline > 0.0 {
        value / baseline
    } else {
        0.0
    }
}

/// Alerts for a sector compared to the national baseline and to its own history
pub fn sector_insights(view: ViewId, record: &SectorRecord, dataset: &Dataset) -> Vec<Insight> {
    use InsightLevel::*;

    let config = ViewConfig::for_view(view);
    let s = &record.stats;
    let nat = &dataset.national().stats;
    let mut insights = Vec::new();

    let if_ratio = ratio(s.indice_frequence(), nat.indice_frequence());
    if if_ratio >= 3.0 {
        insights.push(Insight::new(
            Danger,
            format!("Indice de fréquence {:.1}x la moyenne nationale", if_ratio),
        ));
    } else if if_ratio >= 2.0 {
        insights.push(Insight::new(
            Danger,
            format!("IF {:.1}x au-dessus de la moyenne nationale", if_ratio),
        ));
    } else if if_ratio >= 1.3 {
        insights.push(Insight::new(
            Warn,
            format!(
                "IF {}% au-dessus de la moyenne nationale",
                ((if_ratio - 1.0) * 100.0).round()
            ),
        ));
    } else if if_ratio > 0.0 && if_ratio <= 0.5 {
        insights.push(Insight::new(Info, "IF 2x en dessous de la moyenne nationale"));
    }

    let tg_ratio = ratio(s.taux_gravite(), nat.taux_gravite());
    if tg_ratio >= 2.0 {
        insights.push(Insight::new(
            Danger,
            format!("Gravité {:.1}x la moyenne nationale", tg_ratio),
        ));
    } else if tg_ratio >= 1.3 {
        insights.push(Insight::new(
            Warn,
            format!(
                "Gravité {}% au-dessus de la moyenne",
                ((tg_ratio - 1.0) * 100.0).round()
            ),
        ));
    }

    let events = config.events(s);
    let ip_rate = ratio(s.nouvelles_ip(), events) * 100.0;
    if ip_rate >= 5.0 {
        insights.push(Insight::new(
            Danger,
            format!("{:.1}% mènent à une incapacité permanente", ip_rate),
        ));
    } else if ip_rate >= 3.0 {
        insights.push(Insight::new(
            Warn,
            format!("{:.1}% mènent à une incapacité permanente", ip_rate),
        ));
    }

    let deaths = s.deces();
    if deaths > 0.0 {
        let plural = if deaths > 1.0 { "s" } else { "" };
        let year = dataset
            .year_span()
            .map(|(_, last)| format!(" en {}", last))
            .unwrap_or_default();
        insights.push(Insight::new(
            Danger,
            format!("{} décès enregistré{}{}", format_count(deaths), plural, year),
        ));
    }

    if let Some((cause, share)) = record.top_cause() {
        if share >= 35.0 {
            insights.push(Insight::new(Warn, format!("{} = {:.0}% des cas", cause, share)));
        }
    }

    if events >= 10_000.0 {
        insights.push(Insight::new(
            Info,
            format!("{} cas, secteur à fort volume", format_count(events)),
        ));
    }

    if view == ViewId::Mp {
        let severe_rate = ratio(s.value(keys::IP_TAUX_SUP_10), events) * 100.0;
        if severe_rate >= 10.0 {
            insights.push(Insight::new(
                Danger,
                format!("{:.0}% des MP avec taux IP >= 10%", severe_rate),
            ));
        }
    }

    insights.extend(trend_insights(record, dataset));
    insights
}

/// First-to-last year evolution of frequency and severity
fn trend_insights(record: &SectorRecord, dataset: &Dataset) -> Vec<Insight> {
    let mut insights = Vec::new();
    let (Some(yearly), Some((first, last))) = (record.yearly.as_ref(), dataset.year_span()) else {
        return insights;
    };
    let (Some(start), Some(end)) = (yearly.get(first), yearly.get(last)) else {
        return insights;
    };

    let if_start = start.indice_frequence();
    if if_start > 0.0 {
        let delta = (end.indice_frequence() - if_start) / if_start * 100.0;
        if delta <= -15.0 {
            insights.push(Insight::new(
                InsightLevel::Info,
                format!("IF en baisse de {:.0}% depuis {}", delta.abs(), first),
            ));
        } else if delta >= 15.0 {
            insights.push(Insight::new(
                InsightLevel::Warn,
                format!("IF en hausse de {:.0}% depuis {}", delta, first),
            ));
        }
    }

    let tg_start = start.taux_gravite();
    if tg_start > 0.0 {
        let delta = (end.taux_gravite() - tg_start) / tg_start * 100.0;
        if delta >= 20.0 {
            insights.push(Insight::new(
                InsightLevel::Danger,
                format!("Gravité en hausse de {:.0}% depuis {}", delta, first),
            ));
        }
    }
    insights
}
