use serde_json::{json, Value};
use std::path::PathBuf;

use contracts::enums::ViewId;

fn record(libelle: &str, indice_frequence: f64) -> Value {
    json!({
        "libelle": libelle,
        "stats": {
            "at_1er_reglement": 1200,
            "mp_1er_reglement": 40,
            "trajet_count": 300,
            "indice_frequence": indice_frequence,
            "taux_gravite": 1.2
        }
    })
}

pub(crate) fn dataset_json() -> Value {
    json!({
        "by_naf2": {"47": record("Commerce de détail", 40.0)},
        "by_naf4": {"4711": record("Commerce de détail en magasin non spécialisé", 42.0)},
        "by_naf5": {
            "4711D": record("Supermarchés", 45.0),
            "4711F": record("Hypermarchés", 48.0)
        },
        "naf_index": [
            {"code": "4711D", "libelle": "Supermarchés", "level": "naf5"}
        ],
        "meta": {
            "source": "test",
            "national": {"indice_frequence": 30.0, "taux_gravite": 1.5},
            "years": ["2023"]
        }
    })
}

/// Fresh directory under the system temp dir holding one file per view
pub(crate) fn write_data_dir(name: &str, dataset: &Value) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("naf-risk-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    for view in ViewId::all() {
        std::fs::write(dir.join(view.data_file()), dataset.to_string()).unwrap();
    }
    dir
}
