//! Small `at` dataset shared by unit tests

use serde_json::{json, Value};

use async_trait::async_trait;

use super::Dataset;
use crate::enums::ViewId;
use crate::shared::data_store::DatasetSource;
use crate::shared::errors::{DataError, DataResult};

fn record(libelle: &str, indice_frequence: f64, events: f64) -> Value {
    json!({
        "libelle": libelle,
        "stats": {
            "at_1er_reglement": events,
            "indice_frequence": indice_frequence,
            "taux_gravite": indice_frequence / 20.0,
            "nouvelles_ip": (events / 25.0).round(),
            "deces": 0,
            "nb_salaries": events * 1000.0 / indice_frequence,
        }
    })
}

pub(crate) fn at_json() -> Value {
    let mut meat = record("Transformation et conservation de la viande de boucherie", 95.0, 4000.0);
    meat["risk_causes"] = json!({
        "Manutention manuelle": 52.0,
        "Chutes de plain-pied": 28.0,
        "Outillage": 20.0
    });
    meat["yearly"] = json!({
        "2021": {"indice_frequence": 110.0, "taux_gravite": 4.0},
        "2023": {"indice_frequence": 95.0, "taux_gravite": 4.75}
    });
    meat["stats"]["deces"] = json!(2);

    json!({
        "by_naf2": {
            "10": record("Industries alimentaires", 50.0, 30000.0),
            "35": record("Production et distribution d'électricité, de gaz, de vapeur et d'air conditionné", 8.0, 900.0),
            "47": record("Commerce de détail, à l'exception des automobiles et des motocycles", 40.0, 60000.0),
            "62": record("Programmation, conseil et autres activités informatiques", 4.0, 2500.0)
        },
        "by_naf4": {
            "1011": record("Transformation et conservation de la viande de boucherie", 95.0, 4000.0),
            "3511": record("Production d'électricité", 7.0, 300.0),
            "4711": record("Commerce de détail en magasin non spécialisé à prédominance alimentaire", 42.0, 35000.0),
            "6201": record("Programmation informatique", 3.5, 600.0),
            "6202": record("Conseil en systèmes et logiciels informatiques", 4.5, 1200.0)
        },
        "by_naf5": {
            "1011Z": meat,
            "3511Z": record("Production d'électricité", 7.0, 300.0),
            "4711A": record("Commerce de détail de produits surgelés", 35.0, 800.0),
            "4711D": record("Supermarchés", 45.0, 20000.0),
            "6201Z": record("Programmation informatique", 3.5, 600.0),
            "6202A": record("Conseil en systèmes et logiciels informatiques", 4.2, 900.0),
            "6202B": record("Tierce maintenance de systèmes et d'applications informatiques", 5.1, 300.0)
        },
        "meta": {
            "source": "Ameli - Risque AT par CTN x NAF 2023",
            "national": {
                "at_1er_reglement": 555000,
                "indice_frequence": 30.0,
                "taux_gravite": 1.5,
                "nouvelles_ip": 20000,
                "deces": 700,
                "nb_salaries": 19300000,
                "yearly": {
                    "2021": {"indice_frequence": 33.0, "taux_gravite": 1.4},
                    "2023": {"indice_frequence": 30.0, "taux_gravite": 1.5}
                }
            },
            "years": ["2021", "2023"]
        }
    })
}

pub(crate) fn at_dataset() -> Dataset {
    Dataset::from_json(ViewId::At, &at_json().to_string()).expect("fixture parses")
}

/// `mp` flavour of the fixture without the 6201 branch
pub(crate) fn mp_json() -> Value {
    let mut value = at_json();
    for (table, code) in [("by_naf4", "6201"), ("by_naf5", "6201Z")] {
        if let Some(map) = value[table].as_object_mut() {
            map.remove(code);
        }
    }
    value
}

/// Serves `at` and `mp` from the fixtures; `trajet` answers 404
pub(crate) struct FixtureSource;

#[async_trait(?Send)]
impl DatasetSource for FixtureSource {
    async fn fetch(&self, view: ViewId) -> DataResult<Dataset> {
        match view {
            ViewId::At => Dataset::from_json(view, &at_json().to_string()),
            ViewId::Mp => Dataset::from_json(view, &mp_json().to_string()),
            ViewId::Trajet => Err(DataError::Load { view, status: 404 }),
        }
    }
}
