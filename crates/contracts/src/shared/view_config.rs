//! Per-view constants: labels, primary indicator, sources and funnel composition

use crate::domain::sector::record::keys;
use crate::domain::sector::Stats;
use crate::enums::ViewId;

/// One bar of the severity funnel
#[derive(Debug, Clone, PartialEq)]
pub struct FunnelItem {
    pub label: &'static str,
    pub value: f64,
}

#[derive(Debug)]
pub struct ViewConfig {
    pub view: ViewId,
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Stats key of the primary event count
    pub event_key: &'static str,
    pub event_label: &'static str,
    pub secondary_key: &'static str,
    pub source_label: &'static str,
    pub source_url: &'static str,
    /// Heading of the cause breakdown; `None` when the view has no causes
    pub causes_title: Option<&'static str>,
    funnel: fn(&Stats) -> Vec<FunnelItem>,
}

impl ViewConfig {
    pub fn for_view(view: ViewId) -> &'static ViewConfig {
        match view {
            ViewId::At => &AT_CONFIG,
            ViewId::Mp => &MP_CONFIG,
            ViewId::Trajet => &TRAJET_CONFIG,
        }
    }

    /// Funnel bars from most to least severe
    pub fn funnel_items(&self, stats: &Stats) -> Vec<FunnelItem> {
        (self.funnel)(stats)
    }

    /// Primary event count of a stats snapshot
    pub fn events(&self, stats: &Stats) -> f64 {
        stats.value(self.event_key)
    }
}

fn severity_head(stats: &Stats) -> Vec<FunnelItem> {
    vec![
        FunnelItem {
            label: "Décès",
            value: stats.deces(),
        },
        FunnelItem {
            label: "Incapacités permanentes",
            value: stats.nouvelles_ip(),
        },
    ]
}

fn at_funnel(stats: &Stats) -> Vec<FunnelItem> {
    let mut items = severity_head(stats);
    items.push(FunnelItem {
        label: "AT avec arrêt 4j+",
        value: stats.value(keys::AT_4J_ARRET),
    });
    items.push(FunnelItem {
        label: "AT en 1er règlement",
        value: stats.value(keys::AT_1ER_REGLEMENT),
    });
    items
}

fn mp_funnel(stats: &Stats) -> Vec<FunnelItem> {
    let mut items = severity_head(stats);
    items.push(FunnelItem {
        label: "MP en 1er règlement",
        value: stats.value(keys::MP_1ER_REGLEMENT),
    });
    items
}

fn trajet_funnel(stats: &Stats) -> Vec<FunnelItem> {
    let mut items = severity_head(stats);
    items.push(FunnelItem {
        label: "Acc. trajet en 1er règlement",
        value: stats.value(keys::TRAJET_COUNT),
    });
    items
}

static AT_CONFIG: ViewConfig = ViewConfig {
    view: ViewId::At,
    title: "Accidents du Travail par Secteur",
    subtitle: "Statistiques de sinistralité par code NAF. 729 secteurs, 19,3M salariés.",
    event_key: keys::AT_1ER_REGLEMENT,
    event_label: "AT en 1er règlement",
    secondary_key: keys::AT_4J_ARRET,
    source_label: "Ameli, Risque AT par CTN x NAF 2023",
    source_url: "https://assurance-maladie.ameli.fr/etudes-et-donnees/risque-at-ctn-x-naf-serie-annuelle",
    causes_title: Some("Causes d'accidents"),
    funnel: at_funnel,
};

static MP_CONFIG: ViewConfig = ViewConfig {
    view: ViewId::Mp,
    title: "Maladies Professionnelles par Secteur",
    subtitle: "Statistiques de maladies professionnelles par code NAF. 729 secteurs.",
    event_key: keys::MP_1ER_REGLEMENT,
    event_label: "MP en 1er règlement",
    secondary_key: keys::MP_1ER_REGLEMENT,
    source_label: "Ameli, Risque MP par CTN x NAF 2023",
    source_url: "https://assurance-maladie.ameli.fr/etudes-et-donnees/risque-mp-ctn-x-naf-serie-annuelle",
    causes_title: Some("Types de maladies"),
    funnel: mp_funnel,
};

static TRAJET_CONFIG: ViewConfig = ViewConfig {
    view: ViewId::Trajet,
    title: "Accidents de Trajet par Secteur",
    subtitle: "Statistiques d'accidents de trajet par code NAF. 629 secteurs.",
    event_key: keys::TRAJET_COUNT,
    event_label: "Accidents de trajet",
    secondary_key: keys::TRAJET_COUNT,
    source_label: "Ameli, Fiches NAF 2023 (PDF)",
    source_url: "https://assurance-maladie.ameli.fr/etudes-et-donnees/sinistralite-at-mp-par-code-naf",
    causes_title: None,
    funnel: trajet_funnel,
};
