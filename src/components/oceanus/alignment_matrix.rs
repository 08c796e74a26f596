use std::collections::BTreeSet;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::ApiClient;
use crate::components::status::FetchStatusLine;
use crate::encoding::color::sentiment_color;
use crate::model::insight::AlignmentMatrix;
use crate::stores::scale::ScaleStore;
use crate::stores::visualization::VisualizationStore;

/// Every industry named as a row or column.
pub fn industries(matrix: &AlignmentMatrix) -> Vec<String> {
	let names: BTreeSet<&String> = matrix.keys().chain(matrix.values().flat_map(|row| row.keys())).collect();
	names.into_iter().cloned().collect()
}

/// Similarity of two industries, looked up in either orientation.
pub fn alignment(matrix: &AlignmentMatrix, left: &str, right: &str) -> Option<f64> {
	let at = |a: &str, b: &str| matrix.get(a).and_then(|row| row.get(b)).copied();
	at(left, right).or_else(|| at(right, left))
}

#[component]
fn IndustrySelect(value: Signal<String>, options: Signal<Vec<String>>, on_set: Callback<String>) -> impl IntoView {
	view! {
		<select prop:value=move || value.get() on:change=move |ev| on_set.run(event_target_value(&ev))>
			{move || {
				options
					.get()
					.into_iter()
					.map(|o| {
						let value = o.clone();
						view! { <option value=value>{o}</option> }
					})
					.collect_view()
			}}
		</select>
	}
}

/// Industry by industry interest alignment with a left/right comparison.
#[component]
pub fn AlignmentMatrixView() -> impl IntoView {
	let api = expect_context::<ApiClient>();
	let viz = expect_context::<VisualizationStore>();
	let state = viz.state();
	let scale = expect_context::<ScaleStore>();
	let weighted = RwSignal::new(true);

	let names = Signal::derive(move || state.with(|s| industries(&s.industry_similarity)));
	let options = Signal::derive(move || scale.state().with(|s| s.industries.clone()));
	let left = Signal::derive(move || scale.state().with(|s| s.left_industry.clone()));
	let right = Signal::derive(move || scale.state().with(|s| s.right_industry.clone()));

	let on_weight = move |ev| {
		let weight = event_target_checked(&ev);
		weighted.set(weight);
		let api = api.clone();
		spawn_local(async move { viz.load_industry_similarity(&api, weight).await });
	};

	let comparison = move || {
		let (l, r) = (left.get(), right.get());
		state.with(|s| match alignment(&s.industry_similarity, &l, &r) {
			Some(v) => format!("{l} vs {r}: {v:.2}"),
			None => format!("{l} vs {r}: no data"),
		})
	};

	let table = move || {
		let (l, r) = (left.get(), right.get());
		let names = names.get();
		state.with(|s| {
			let header = names.iter().map(|n| view! { <th>{n.clone()}</th> }).collect_view();
			let body = names
				.iter()
				.map(|row| {
					let cells = names
						.iter()
						.map(|col| {
							let value = alignment(&s.industry_similarity, row, col);
							let picked = (*row == l && *col == r) || (*row == r && *col == l);
							view! {
								<td
									class:picked=picked
									style:background-color=value.map(sentiment_color).unwrap_or_default()
									title=value.map(|v| format!("{v:.2}"))
								></td>
							}
						})
						.collect_view();
					view! { <tr><th>{row.clone()}</th>{cells}</tr> }
				})
				.collect_view();
			view! {
				<table class="alignment-matrix">
					<thead><tr><th></th>{header}</tr></thead>
					<tbody>{body}</tbody>
				</table>
			}
		})
	};

	view! {
		<section class="alignment">
			<h3>"Industry interest alignment"</h3>
			<FetchStatusLine status=viz.similarity_status() what="industry alignment" />
			<div class="controls">
				<IndustrySelect value=left options=options on_set=Callback::new(move |v| scale.set_left_industry(v)) />
				<IndustrySelect value=right options=options on_set=Callback::new(move |v| scale.set_right_industry(v)) />
				<label>
					<input type="checkbox" prop:checked=move || weighted.get() on:change=on_weight />
					"Weight by sentiment strength"
				</label>
			</div>
			<p class="comparison">{comparison}</p>
			{table}
		</section>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::BTreeMap;

	fn matrix() -> AlignmentMatrix {
		let mut m = AlignmentMatrix::new();
		m.insert("tourism".into(), BTreeMap::from([("large vessel".to_string(), -0.4)]));
		m.insert("fishing".into(), BTreeMap::from([("tourism".to_string(), 0.3)]));
		m
	}

	#[test]
	fn lookup_in_either_orientation() {
		let m = matrix();
		assert_eq!(alignment(&m, "large vessel", "tourism"), Some(-0.4));
		assert_eq!(alignment(&m, "tourism", "fishing"), Some(0.3));
		assert_eq!(alignment(&m, "fishing", "large vessel"), None);
	}

	#[test]
	fn industries_cover_rows_and_columns_sorted() {
		assert_eq!(industries(&matrix()), vec!["fishing", "large vessel", "tourism"]);
	}
}
