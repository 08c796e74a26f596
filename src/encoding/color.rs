use std::collections::HashMap;

pub const DEFAULT_NODE_COLOR: &str = "#e22352";
pub const DEFAULT_EDGE_COLOR: &str = "#ffaeaf";
pub const DIMMED_COLOR: &str = "#3a3a4e";
pub const UNKNOWN_COLOR: &str = "#7f7f7f";

/// Sentiment scale stops at -1, 0 and 1.
pub const SENTIMENT_LOW: &str = "#d15f5d";
pub const SENTIMENT_MID: &str = "#9ca3af";
pub const SENTIMENT_HIGH: &str = "#6a9f58";
pub const NEUTRAL_BASE: &str = "#6366f1";

/// Fill of a map zone by its classification.
pub fn zone_color(zone: &str) -> &'static str {
	match zone {
		"government" => "#6366f1",
		"commercial" => "#f59e0b",
		"residential" => "#10b981",
		"industrial" => "#ef4444",
		_ => "grey",
	}
}

/// Colour of a source corpus.
pub fn dataset_color(tag: &str) -> &'static str {
	match tag {
		"jo" => "#3b82f6",
		"fi" => "#10b981",
		"tr" => "#f97316",
		_ => UNKNOWN_COLOR,
	}
}

fn hex_rgb(hex: &str) -> (f64, f64, f64) {
	let channel = |i: usize| {
		u8::from_str_radix(hex.get(i..i + 2).unwrap_or("00"), 16).unwrap_or(0) as f64
	};
	(channel(1), channel(3), channel(5))
}

/// Linear scale over [-1, 0, 1] through the three sentiment stops.
/// Values outside the domain are clamped.
pub fn sentiment_color(value: f64) -> String {
	let v = if value.is_finite() { value.clamp(-1.0, 1.0) } else { 0.0 };
	let (from, to, t) = if v < 0.0 {
		(SENTIMENT_LOW, SENTIMENT_MID, v + 1.0)
	} else {
		(SENTIMENT_MID, SENTIMENT_HIGH, v)
	};
	let (a, b) = (hex_rgb(from), hex_rgb(to));
	let lerp = |x: f64, y: f64| (x + (y - x) * t).round() as u8;
	format!("#{:02x}{:02x}{:02x}", lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// 32-bit FNV-1a over the UTF-8 bytes.
fn fnv1a(value: &str) -> u32 {
	value.bytes().fold(0x811c_9dc5, |h, b| (h ^ b as u32).wrapping_mul(0x0100_0193))
}

/// Colour derived only from the value itself.
pub fn hash_color(value: &str) -> String {
	let h = fnv1a(value);
	let hue = h % 360;
	let lightness = 45 + (h >> 9) % 20;
	format!("hsl({hue}, 70%, {lightness}%)")
}

/// Colour per distinct categorical value, rebuilt from scratch whenever the
/// colour-by attribute or the graph changes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorMap {
	colors: HashMap<String, String>,
}

impl ColorMap {
	pub fn build<'a, I: IntoIterator<Item = &'a str>>(values: I) -> Self {
		let mut colors = HashMap::new();
		for value in values {
			colors
				.entry(value.to_string())
				.or_insert_with(|| hash_color(value));
		}
		Self { colors }
	}

	pub fn get(&self, value: &str) -> &str {
		self.colors.get(value).map_or(UNKNOWN_COLOR, String::as_str)
	}

	pub fn len(&self) -> usize {
		self.colors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}

	/// (value, colour) pairs sorted by value, for legends.
	pub fn legend(&self) -> Vec<(&str, &str)> {
		let mut entries: Vec<_> = self
			.colors
			.iter()
			.map(|(k, v)| (k.as_str(), v.as_str()))
			.collect();
		entries.sort_unstable();
		entries
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn same_value_same_color_across_rebuilds() {
		let first = ColorMap::build(["EU", "NA", "EU"]);
		let second = ColorMap::build(["NA", "AS", "EU"]);
		assert_eq!(first.len(), 2);
		assert_eq!(first.get("EU"), second.get("EU"));
		assert_ne!(first.get("EU"), first.get("NA"));
		assert_eq!(first.get("AF"), UNKNOWN_COLOR);
	}

	#[test]
	fn sentiment_scale_hits_its_stops() {
		assert_eq!(sentiment_color(-1.0), SENTIMENT_LOW);
		assert_eq!(sentiment_color(0.0), SENTIMENT_MID);
		assert_eq!(sentiment_color(1.0), SENTIMENT_HIGH);
		assert_eq!(sentiment_color(7.0), SENTIMENT_HIGH);
		assert_eq!(sentiment_color(f64::NAN), SENTIMENT_MID);
	}

	#[test]
	fn zone_colors_fall_back_to_grey() {
		assert_eq!(zone_color("industrial"), "#ef4444");
		assert_eq!(zone_color("swamp"), "grey");
		assert_eq!(dataset_color("fi"), "#10b981");
	}
}
