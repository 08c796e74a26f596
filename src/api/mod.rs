//! Thin typed client over the dashboard backend.

mod request;

pub use request::{FetchStatus, RequestTracker};

use gloo_net::http::{Request, RequestBuilder, Response};
use log::debug;
use web_sys::RequestCredentials;

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::model::airport::{AirportFilterOptions, AirportGraph};
use crate::model::decode_records;
use crate::model::entity::{EntityGraph, EntityKind, GraphMembership, Node};
use crate::model::geojson::FeatureCollection;
use crate::model::insight::{
	AlignmentMatrix, DatasetCounts, EntityTopicSentiment, IndustrySentiment, TripActivity,
};
use crate::stores::filter::Filters;

#[derive(Clone, Debug, Default)]
pub struct ApiClient {
	config: AppConfig,
}

impl ApiClient {
	pub fn new(config: AppConfig) -> Self {
		Self { config }
	}

	fn get(&self, path: &str) -> RequestBuilder {
		self.credentials(Request::get(&self.config.endpoint(path)))
	}

	fn credentials(&self, builder: RequestBuilder) -> RequestBuilder {
		if self.config.with_credentials {
			builder.credentials(RequestCredentials::Include)
		} else {
			builder
		}
	}

	/// `GET /airport_attributes`
	pub async fn airport_attributes(&self) -> Result<AirportFilterOptions> {
		let value = read_json(self.get("airport_attributes").send().await?).await?;
		Ok(serde_json::from_value(value)?)
	}

	/// `POST /simple-filtered-graph` with numeric bounds in the query and the
	/// categorical selections as the JSON body.
	pub async fn simple_filtered_graph(&self, filters: &Filters) -> Result<AirportGraph> {
		let bounds = filters.query_pairs();
		let request = self
			.credentials(Request::post(&self.config.endpoint("simple-filtered-graph")))
			.query(bounds.iter().map(|(k, v)| (*k, v.as_str())))
			.json(&filters.categorical())?;
		let value = read_json(request.send().await?).await?;
		AirportGraph::from_value(value)
	}

	/// `GET /entities?entity=<kind>`
	pub async fn entities(&self, kind: EntityKind) -> Result<Vec<Node>> {
		let request = self.get("entities").query([("entity", kind.as_str())]);
		let records: Vec<serde_json::Value> =
			serde_json::from_value(read_json(request.send().await?).await?)?;
		Ok(decode_records(kind.as_str(), records))
	}

	/// `GET /graph-skeleton`
	pub async fn graph_skeleton(&self) -> Result<EntityGraph> {
		EntityGraph::from_value(read_json(self.get("graph-skeleton").send().await?).await?)
	}

	/// `GET /retrieve-sentiments`
	pub async fn sentiments(&self) -> Result<Vec<EntityTopicSentiment>> {
		let records: Vec<serde_json::Value> = serde_json::from_value(
			read_json(self.get("retrieve-sentiments").send().await?).await?,
		)?;
		Ok(decode_records("sentiment", records))
	}

	/// `GET /dataset-specific-nodes-edges?dataset=<tag>`
	pub async fn dataset_counts(&self, dataset: GraphMembership) -> Result<DatasetCounts> {
		let request = self
			.get("dataset-specific-nodes-edges")
			.query([("dataset", dataset.tag())]);
		DatasetCounts::from_value(dataset, read_json(request.send().await?).await?)
	}

	/// `GET /industry-pro-contra-sentiments`
	pub async fn industry_sentiments(&self) -> Result<Vec<IndustrySentiment>> {
		let records: Vec<serde_json::Value> = serde_json::from_value(
			read_json(self.get("industry-pro-contra-sentiments").send().await?).await?,
		)?;
		Ok(decode_records("industry sentiment", records))
	}

	/// `GET /industry-interest-alignment?weight=<bool>`
	pub async fn industry_alignment(&self, weight: bool) -> Result<AlignmentMatrix> {
		let request = self
			.get("industry-interest-alignment")
			.query([("weight", if weight { "true" } else { "false" })]);
		Ok(serde_json::from_value(read_json(request.send().await?).await?)?)
	}

	/// `GET /trip-activity-by-person?person_id=<id>`
	pub async fn trip_activity(&self, person_id: &str) -> Result<Vec<TripActivity>> {
		let request = self
			.get("trip-activity-by-person")
			.query([("person_id", person_id)]);
		let records: Vec<serde_json::Value> =
			serde_json::from_value(read_json(request.send().await?).await?)?;
		Ok(decode_records("trip activity", records))
	}

	/// Static region map, served by the app itself rather than the API.
	pub async fn geojson(&self) -> Result<FeatureCollection> {
		let response = Request::get(&self.config.geojson_url).send().await?;
		FeatureCollection::from_value(read_json(response).await?)
	}
}

async fn read_json(response: Response) -> Result<serde_json::Value> {
	if !response.ok() {
		return Err(AppError::Status {
			status: response.status(),
			url: response.url(),
		});
	}
	debug!("{} -> {}", response.url(), response.status());
	Ok(response.json().await?)
}
