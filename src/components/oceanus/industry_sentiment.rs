use leptos::prelude::*;

use crate::components::status::FetchStatusLine;
use crate::encoding::color::{SENTIMENT_HIGH, SENTIMENT_LOW, SENTIMENT_MID};
use crate::model::entity::GraphMembership;
use crate::model::insight::IndustrySentiment;
use crate::stores::linking::LinkingStore;
use crate::stores::scale::ScaleStore;
use crate::stores::visualization::{IndustryBreakdown, VisualizationStore, industry_breakdown};

/// Breakdown over the stances recorded in `dataset`, or all of them.
pub fn scoped_breakdown(records: &[IndustrySentiment], dataset: Option<GraphMembership>) -> Vec<IndustryBreakdown> {
	match dataset {
		None => industry_breakdown(records),
		Some(d) => {
			let scoped: Vec<IndustrySentiment> = records
				.iter()
				.filter(|r| r.in_graph.contains(&d))
				.cloned()
				.collect();
			industry_breakdown(&scoped)
		}
	}
}

fn share(part: usize, total: usize) -> String {
	format!("{:.1}%", 100.0 * part as f64 / total.max(1) as f64)
}

/// Stacked pro / contra / neutral bars per industry.
#[component]
pub fn IndustrySentimentChart() -> impl IntoView {
	let viz = expect_context::<VisualizationStore>();
	let state = viz.state();
	let scale = expect_context::<ScaleStore>().state();
	let linking = expect_context::<LinkingStore>();

	let rows = move || {
		let dataset = scale.with(|s| s.active_membership());
		let selected = linking.state().with(|l| l.selected_industry.clone());
		state.with(|s| {
			scoped_breakdown(&s.industry_sentiment_raw, dataset)
				.into_iter()
				.map(|row| {
					let total = row.total();
					let is_selected = selected.as_deref() == Some(row.industry.as_str());
					let pick = (!is_selected).then(|| row.industry.clone());
					view! {
						<div class="stacked-row" class:active=is_selected on:click=move |_| linking.select_industry(pick.clone())>
							<span class="bar-label">{row.industry.clone()}</span>
							<span class="stack">
								<span style:width=share(row.positive, total) style:background-color=SENTIMENT_HIGH></span>
								<span style:width=share(row.neutral, total) style:background-color=SENTIMENT_MID></span>
								<span style:width=share(row.negative, total) style:background-color=SENTIMENT_LOW></span>
							</span>
							<span class="bar-count">{format!("+{} / {} / -{}", row.positive, row.neutral, row.negative)}</span>
						</div>
					}
				})
				.collect_view()
		})
	};

	view! {
		<section class="industry-sentiment">
			<h3>"Industry sentiment"</h3>
			<FetchStatusLine status=viz.industry_sentiment_status() what="industry sentiment" />
			{rows}
		</section>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn dataset_scope_filters_records_before_counting() {
		let records: Vec<IndustrySentiment> = serde_json::from_value(json!([
			{"industry": "tourism", "sentiment": 0.8, "in_graph": ["jo"]},
			{"industry": "tourism", "sentiment": -0.2, "in_graph": ["fi"]},
			{"industry": "large vessel", "sentiment": null, "in_graph": ["jo", "fi"]}
		]))
		.unwrap();

		let all = scoped_breakdown(&records, None);
		assert_eq!(all.len(), 2);
		assert_eq!(all[1].total(), 2);

		let fi = scoped_breakdown(&records, Some(GraphMembership::Filah));
		assert_eq!(fi[0].industry, "large vessel");
		assert_eq!(fi[0].neutral, 1);
		assert_eq!(fi[1].negative, 1);
		assert_eq!(fi[1].positive, 0);
	}
}
