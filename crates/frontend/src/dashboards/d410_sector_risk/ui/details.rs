use contracts::dashboards::d410_sector_risk::{
    breadcrumb, comparison_set, event_rank, evolution_series, national_delta, position_strip,
    sector_insights, sector_subtitle, top_by_frequency, ActiveSelection, EvolutionSeries,
    InsightLevel, Trend, TOP_SECTORS,
};
use contracts::domain::sector::Demographics;
use contracts::enums::{NafLevel, ViewId};
use contracts::shared::text::format_count;
use contracts::shared::view_config::ViewConfig;
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;

fn trend_class(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "kpi-delta up",
        Trend::Down => "kpi-delta down",
        Trend::Neutral => "kpi-delta neutral",
    }
}

fn insight_class(level: InsightLevel) -> &'static str {
    match level {
        InsightLevel::Info => "insight info",
        InsightLevel::Warn => "insight warn",
        InsightLevel::Danger => "insight danger",
    }
}

/// One KPI card; `delta` is `(sector, national)` and adds the deviation badge
fn kpi_card(label: &'static str, value: String, delta: Option<(f64, f64)>) -> impl IntoView {
    let badge = delta
        .and_then(|(sector, national)| national_delta(sector, national, false))
        .map(|delta| view! { <span class=trend_class(delta.trend)>{delta.label()}</span> });
    view! {
        <div class="kpi-card">
            <span class="kpi-label">{label}</span>
            <span class="kpi-value">{value}</span>
            {badge}
        </div>
    }
}

fn optional(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.*}", precision, v))
}

fn change_badge(change: Option<f64>) -> Option<impl IntoView> {
    change.map(|pct| {
        let class = if pct > 0.0 {
            "evo-delta up"
        } else if pct < 0.0 {
            "evo-delta down"
        } else {
            "evo-delta neutral"
        };
        let sign = if pct > 0.0 { "+" } else { "" };
        view! { <span class=class>{format!("{}{:.1}%", sign, pct)}</span> }
    })
}

/// Year table: event count, then sector and national frequency index and severity rate
fn evolution_section(series: EvolutionSeries) -> impl IntoView {
    let events_change = change_badge(series.events_change());
    let if_change = change_badge(series.indice_frequence_change());
    let rows = series
        .points
        .into_iter()
        .map(|point| {
            view! {
                <tr>
                    <td class="year">{point.year}</td>
                    <td>{point.events.map_or_else(|| "-".to_string(), format_count)}</td>
                    <td>{optional(point.indice_frequence, 1)}</td>
                    <td class="national">{optional(point.national_indice_frequence, 1)}</td>
                    <td>{optional(point.taux_gravite, 2)}</td>
                    <td class="national">{optional(point.national_taux_gravite, 2)}</td>
                </tr>
            }
        })
        .collect_view();
    view! {
        <section class="evolution">
            <h3>"Évolution"</h3>
            <div class="evo-deltas">
                <span>{series.event_label.clone()} " " {events_change}</span>
                <span>"Indice de fréquence " {if_change}</span>
            </div>
            <table>
                <thead>
                    <tr>
                        <th>"Année"</th>
                        <th>{series.event_label}</th>
                        <th>"IF secteur"</th>
                        <th>"IF national"</th>
                        <th>"TG secteur"</th>
                        <th>"TG national"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </section>
    }
}

/// Victims by sex and age band
fn demographics_section(demographics: Demographics) -> impl IntoView {
    let sex = &demographics.sex;
    let masculin = format!("Masculin : {:.0} %", sex.percent(sex.masculin));
    let feminin = format!("Féminin : {:.0} %", sex.percent(sex.feminin));
    let max_band = demographics
        .age_counts()
        .iter()
        .map(|(_, count)| *count)
        .max()
        .unwrap_or(0)
        .max(1);
    let bands = demographics
        .age_counts()
        .into_iter()
        .map(|(band, count)| {
            let width = format!("width: {:.1}%", count as f64 * 100.0 / max_band as f64);
            view! {
                <li>
                    <span class="band">{band}</span>
                    <span class="bar" style=width></span>
                    <span class="count">{format_count(count as f64)}</span>
                </li>
            }
        })
        .collect_view();
    view! {
        <section class="demographics">
            <h3>"Profil des victimes"</h3>
            <div class="demo-sex">
                <span class="masculin">{masculin}</span>
                <span class="feminin">{feminin}</span>
            </div>
            <ul class="demo-age">{bands}</ul>
        </section>
    }
}

/// Detail panel of the selected sector
#[component]
pub fn SectorDetails(selection: ActiveSelection) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let config = ViewConfig::for_view(selection.view);
    let dataset = &selection.dataset;
    let stats = &selection.record.stats;
    let national = &selection.national().stats;

    let events = config.events(stats);
    let rank = event_rank(dataset, selection.view, selection.level, &selection.code)
        .map(|rank| format!("Rang {} / {}", rank.position, rank.total));

    let crumbs = breadcrumb(dataset, &selection.code, selection.level)
        .into_iter()
        .map(|crumb| {
            if crumb.current {
                view! { <span class="crumb current">{crumb.label}</span> }.into_any()
            } else {
                let code = crumb.code.clone();
                let level = crumb.level;
                view! {
                    <button class="crumb" on:click=move |_| ctx.select(&code, level)>
                        {crumb.label}
                    </button>
                }
                    .into_any()
            }
        })
        .collect_view();

    let funnel = config
        .funnel_items(stats)
        .into_iter()
        .map(|item| {
            view! {
                <li>
                    <span class="funnel-label">{item.label}</span>
                    <span class="funnel-value">{format_count(item.value)}</span>
                </li>
            }
        })
        .collect_view();

    let insights = sector_insights(selection.view, &selection.record, dataset)
        .into_iter()
        .map(|insight| view! { <li class=insight_class(insight.level)>{insight.text}</li> })
        .collect_view();

    let causes = config.causes_title.and_then(|title| {
        let causes = selection.record.risk_causes.clone()?;
        let mut causes: Vec<(String, f64)> = causes.into_iter().collect();
        causes.sort_by(|a, b| b.1.total_cmp(&a.1));
        Some(view! {
            <section class="causes">
                <h3>{title}</h3>
                <ul>
                    {causes
                        .into_iter()
                        .map(|(cause, share)| view! { <li>{cause} " : " {format!("{:.1} %", share)}</li> })
                        .collect_view()}
                </ul>
            </section>
        })
    });

    let evolution = evolution_series(dataset, &selection.record, selection.view)
        .map(evolution_section);
    let demographics = selection
        .record
        .demographics
        .clone()
        .filter(|demo| !demo.is_empty())
        .map(demographics_section);
    let subtitle = sector_subtitle(selection.level, &selection.record);

    let comparison = comparison_set(dataset, &selection.code, selection.level);
    let comparison_title = comparison.title();
    let click_level = comparison.click_level;
    let comparison_items = comparison
        .items
        .into_iter()
        .map(|item| {
            let current = item.code == selection.code;
            let code = item.code.clone();
            view! {
                <li class:current=current>
                    <button on:click=move |_| ctx.select(&code, click_level)>
                        <span class="code">{item.code}</span>
                        <span class="libelle">{item.libelle}</span>
                        <span class="value">{format!("{:.1}", item.indice_frequence)}</span>
                    </button>
                </li>
            }
        })
        .collect_view();

    let strip = position_strip(dataset, selection.level).map(|strip| {
        let national_left = format!("left: {:.1}%", strip.offset(strip.national));
        let markers = strip
            .points
            .iter()
            .map(|point| {
                let style = format!("left: {:.1}%", strip.offset(point.indice_frequence));
                let current = point.code == selection.code;
                view! {
                    <span class="strip-dot" class:current=current style=style title=point.code.clone()></span>
                }
            })
            .collect_view();
        view! {
            <section class="position-strip">
                <div class="strip-track">
                    {markers}
                    <span class="strip-national" style=national_left></span>
                </div>
                <div class="strip-scale">
                    <span>{format!("{:.1}", strip.min)}</span>
                    <span>{format!("{:.1}", strip.max)}</span>
                </div>
            </section>
        }
    });

    view! {
        <div class="d410-results visible">
            <nav class="breadcrumb">{crumbs}</nav>
            <header class="sector-header">
                <span class="sector-code">{selection.code.clone()}</span>
                <h2>{selection.record.libelle.clone()}</h2>
                <span class="level-tag">{subtitle}</span>
            </header>

            <div class="kpi-grid">
                {kpi_card(config.event_label, format_count(events), None)}
                {kpi_card(
                    "Indice de fréquence",
                    format!("{:.1}", stats.indice_frequence()),
                    Some((stats.indice_frequence(), national.indice_frequence())),
                )}
                {kpi_card(
                    "Taux de gravité",
                    format!("{:.2}", stats.taux_gravite()),
                    Some((stats.taux_gravite(), national.taux_gravite())),
                )}
                {kpi_card("Décès", format_count(stats.deces()), None)}
                {kpi_card("Journées perdues", format_count(stats.journees_it()), None)}
                {kpi_card("Incapacités permanentes", format_count(stats.nouvelles_ip()), None)}
                {kpi_card("Salariés", format_count(stats.nb_salaries()), None)}
                {rank.map(|rank| view! { <div class="kpi-rank">{rank}</div> })}
            </div>

            <section class="funnel">
                <h3>"Gravité"</h3>
                <ul>{funnel}</ul>
            </section>

            <section class="insights">
                <h3>"Points d'attention"</h3>
                <ul>{insights}</ul>
            </section>

            {causes}

            {evolution}

            {demographics}

            <section class="comparison">
                <h3>{comparison_title}</h3>
                <ul>{comparison_items}</ul>
            </section>

            {strip}
        </div>
    }
}

/// Default panel: national figures and the most exposed detailed codes
#[component]
pub fn NationalOverview(view: ViewId) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let config = ViewConfig::for_view(view);
    let Ok(dataset) = ctx.with_state_untracked(|s| s.store().get_dataset(view)) else {
        return view! {
            <div class="empty-state">"Données indisponibles pour cette vue"</div>
        }
        .into_any();
    };

    let national = &dataset.national().stats;
    let top = top_by_frequency(&dataset, view, TOP_SECTORS)
        .into_iter()
        .map(|sector| {
            let code = sector.code.clone();
            view! {
                <li>
                    <button on:click=move |_| ctx.select(&code, NafLevel::Naf5)>
                        <span class="code">{sector.code}</span>
                        <span class="libelle">{sector.libelle}</span>
                        <span class="value">{format!("{:.1}", sector.indice_frequence)}</span>
                    </button>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="empty-state">
            <div class="kpi-grid">
                {kpi_card(config.event_label, format_count(config.events(national)), None)}
                {kpi_card("Indice de fréquence", format!("{:.1}", national.indice_frequence()), None)}
                {kpi_card("Taux de gravité", format!("{:.2}", national.taux_gravite()), None)}
                {kpi_card("Décès", format_count(national.deces()), None)}
                {kpi_card("Journées perdues", format_count(national.journees_it()), None)}
                {kpi_card("Incapacités permanentes", format_count(national.nouvelles_ip()), None)}
                {kpi_card("Salariés", format_count(national.nb_salaries()), None)}
            </div>
            <section class="top-sectors">
                <h3>"Secteurs les plus exposés (indice de fréquence)"</h3>
                <ol>{top}</ol>
            </section>
        </div>
    }
    .into_any()
}
