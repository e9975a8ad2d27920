use crate::backend::Backend;
use crate::threshold::Bounds;
use serde::{Deserialize, Serialize};
use umpire_metrics::Aggregator;

/// Raw check parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckParams {
    #[serde(default)]
    pub metric: Option<String>,
    #[serde(default)]
    pub min: Option<String>,
    #[serde(default)]
    pub max: Option<String>,
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub empty_ok: Option<String>,
    #[serde(default)]
    pub backend: Option<String>,
    #[serde(default)]
    pub aggregate: Option<String>,
}

impl CheckParams {
    /// A present number is read from its leading digits (`"80kb"` is 80, `""` is 0).
    /// A range that does not come out positive is dropped.
    pub fn into_request(self) -> CheckRequest {
        CheckRequest {
            metric: self.metric,
            min: self.min.as_deref().map(leading_float),
            max: self.max.as_deref().map(leading_float),
            range: self.range.as_deref().and_then(leading_range),
            empty_ok: self.empty_ok.is_some(),
            backend: Backend::from_selector(self.backend.as_deref()),
            aggregator: Aggregator::from_selector(self.aggregate.as_deref()),
        }
    }
}

/// Builds params from raw query pairs. A repeated key keeps its last value and
/// unknown keys are ignored.
impl FromIterator<(String, String)> for CheckParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = CheckParams::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "metric" => &mut params.metric,
                "min" => &mut params.min,
                "max" => &mut params.max,
                "range" => &mut params.range,
                "empty_ok" => &mut params.empty_ok,
                "backend" => &mut params.backend,
                "aggregate" => &mut params.aggregate,
                _ => continue,
            };
            *slot = Some(value);
        }
        params
    }
}

fn count_digits(bytes: &[u8], from: usize) -> usize {
    bytes
        .get(from..)
        .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
}

fn sign_len(bytes: &[u8], at: usize) -> usize {
    usize::from(matches!(bytes.get(at), Some(b'+' | b'-')))
}

/// Longest decimal prefix of `raw`, or 0.0 when it has none.
fn leading_float(raw: &str) -> f64 {
    let text = raw.trim_start();
    let bytes = text.as_bytes();

    let mut end = sign_len(bytes, 0);
    let int_digits = count_digits(bytes, end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(bytes, end + 1);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_start = end + 1 + sign_len(bytes, end + 1);
        let exp_digits = count_digits(bytes, exp_start);
        if exp_digits > 0 {
            end = exp_start + exp_digits;
        }
    }

    text[..end].parse().unwrap_or(0.0)
}

/// Leading integer of `raw` when it is positive.
fn leading_range(raw: &str) -> Option<u64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();

    let sign = sign_len(bytes, 0);
    let digits = count_digits(bytes, sign);
    if digits == 0 || bytes.first() == Some(&b'-') {
        return None;
    }

    let value = text[sign..sign + digits].parse::<u64>().unwrap_or(u64::MAX);
    Some(value).filter(|v| *v > 0)
}

/// A single threshold check. Fields stay optional until the evaluator
/// validates them, so an incomplete request still reaches it and comes back
/// as `Invalid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckRequest {
    pub metric: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub range: Option<u64>,
    pub empty_ok: bool,
    pub backend: Backend,
    pub aggregator: Aggregator,
}

impl CheckRequest {
    pub fn new(metric: impl Into<String>, range: u64) -> Self {
        Self {
            metric: Some(metric.into()),
            min: None,
            max: None,
            range: Some(range),
            empty_ok: false,
            backend: Backend::default(),
            aggregator: Aggregator::default(),
        }
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn empty_ok(mut self, empty_ok: bool) -> Self {
        self.empty_ok = empty_ok;
        self
    }

    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn aggregator(mut self, aggregator: Aggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn metric_name(&self) -> Option<&str> {
        self.metric.as_deref().filter(|m| !m.is_empty())
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::new(self.min, self.max)
    }

    /// Metric name, range and bounds, or `None` if any is missing.
    pub fn validate(&self) -> Option<(&str, u64, Bounds)> {
        Some((self.metric_name()?, self.range?, self.bounds()?))
    }
}
