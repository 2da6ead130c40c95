use crate::imports::*;
use chrono::{DateTime, Utc};

/// Meteorological variables understood by [WeatherTrace].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherVariable {
    WindSpeed,
    Temperature,
    Pressure,
    RoughnessLength,
    TurbulenceIntensity,
}

impl WeatherVariable {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WindSpeed => "wind_speed",
            Self::Temperature => "temperature",
            Self::Pressure => "pressure",
            Self::RoughnessLength => "roughness_length",
            Self::TurbulenceIntensity => "turbulence_intensity",
        }
    }
}

impl TryFrom<&str> for WeatherVariable {
    type Error = anyhow::Error;
    fn try_from(value: &str) -> anyhow::Result<WeatherVariable> {
        let variable = match value {
            "wind_speed" => Self::WindSpeed,
            "temperature" => Self::Temperature,
            "pressure" => Self::Pressure,
            "roughness_length" => Self::RoughnessLength,
            "turbulence_intensity" => Self::TurbulenceIntensity,
            _ => {
                bail!(
                    "Unknown weather variable {value:?}; must be one of 'wind_speed', \
                     'temperature', 'pressure', 'roughness_length', 'turbulence_intensity'."
                )
            }
        };
        Ok(variable)
    }
}

impl fmt::Display for WeatherVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single variable recorded at a fixed measurement height.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherColumn {
    pub variable: WeatherVariable,
    /// measurement height above ground
    pub height: si::Length,
    /// samples in SI base units (m/s, K, Pa, m, dimensionless)
    pub values: Vec<f64>,
}

/// Time-indexed table of meteorological variables, each recorded at one or
/// more measurement heights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherTrace {
    /// row timestamps
    pub time: Vec<DateTime<Utc>>,
    /// variable columns, keyed by `(variable, height)`
    pub columns: Vec<WeatherColumn>,
}

impl SerdeAPI for WeatherTrace {
    fn init(&mut self) -> Result<(), WindPlantError> {
        for col in &self.columns {
            if col.values.len() != self.time.len() {
                return Err(WindPlantError::Init(format!(
                    "column ({}, {} m) has {} samples but the time index has {}",
                    col.variable,
                    col.height.get::<si::meter>(),
                    col.values.len(),
                    self.time.len(),
                )));
            }
        }
        Ok(())
    }
}

impl WeatherTrace {
    pub fn empty() -> Self {
        Self {
            time: Vec::new(),
            columns: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty() && self.columns.is_empty()
    }

    /// Appends a column recorded at `height`, replacing any previous column
    /// with the same `(variable, height)` key.
    pub fn push_column(
        &mut self,
        variable: WeatherVariable,
        height: si::Length,
        values: Vec<f64>,
    ) -> anyhow::Result<()> {
        ensure!(
            values.len() == self.time.len(),
            "column ({variable}, {} m) has {} samples but the time index has {}",
            height.get::<si::meter>(),
            values.len(),
            self.time.len(),
        );
        self.columns.retain(|c| {
            !(c.variable == variable && almost_eq(c.height.value, height.value, None))
        });
        self.columns.push(WeatherColumn {
            variable,
            height,
            values,
        });
        Ok(())
    }

    pub fn has_variable(&self, variable: WeatherVariable) -> bool {
        self.columns.iter().any(|c| c.variable == variable)
    }

    /// Recorded measurement heights for `variable`, ascending.
    pub fn heights(&self, variable: WeatherVariable) -> Vec<si::Length> {
        let mut heights: Vec<si::Length> = self
            .columns
            .iter()
            .filter(|c| c.variable == variable)
            .map(|c| c.height)
            .collect();
        heights.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        heights
    }

    /// Column for `variable` recorded at `height`, if present.
    pub fn column(&self, variable: WeatherVariable, height: si::Length) -> Option<&WeatherColumn> {
        self.columns
            .iter()
            .find(|c| c.variable == variable && almost_eq(c.height.value, height.value, None))
    }

    /// Column for `variable` whose measurement height is closest to `height`.
    pub fn closest_column(
        &self,
        variable: WeatherVariable,
        height: si::Length,
    ) -> anyhow::Result<&WeatherColumn> {
        self.columns
            .iter()
            .filter(|c| c.variable == variable)
            .min_by(|a, b| {
                (a.height - height)
                    .abs()
                    .partial_cmp(&(b.height - height).abs())
                    .unwrap_or(Ordering::Equal)
            })
            .with_context(|| format!("weather data contains no {variable} column"))
    }

    /// All columns for `variable` as `(heights in m, series)` pairs ordered by
    /// ascending height, the layout the height-profile models consume.
    pub fn height_table(
        &self,
        variable: WeatherVariable,
    ) -> anyhow::Result<(Vec<f64>, Vec<&[f64]>)> {
        let mut cols: Vec<&WeatherColumn> = self
            .columns
            .iter()
            .filter(|c| c.variable == variable)
            .collect();
        ensure!(
            !cols.is_empty(),
            "weather data contains no {variable} column"
        );
        cols.sort_by(|a, b| a.height.partial_cmp(&b.height).unwrap_or(Ordering::Equal));
        Ok((
            cols.iter()
                .map(|c| c.height.get::<si::meter>())
                .collect(),
            cols.iter().map(|c| c.values.as_slice()).collect(),
        ))
    }

    /// Load weather trace from csv file.
    ///
    /// The first column must be named `time` and hold RFC 3339 timestamps.
    /// Every other column header must be of the form `<variable>_<height>`,
    /// e.g. `wind_speed_10` for wind speed measured at 10 m.
    pub fn from_csv_file<P: AsRef<Path>>(filepath: P) -> anyhow::Result<Self> {
        let filepath = filepath.as_ref();

        let file = File::open(filepath)
            .with_context(|| format!("Could not open weather file: {filepath:?}"))?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);

        let headers = rdr.headers()?.clone();
        ensure!(
            headers
                .get(0)
                .is_some_and(|h| h.trim().eq_ignore_ascii_case("time")),
            "Invalid weather file {filepath:?}; first column must be `time`"
        );
        let mut keys: Vec<(WeatherVariable, si::Length)> = Vec::new();
        for header in headers.iter().skip(1) {
            let (name, height) = header
                .trim()
                .rsplit_once('_')
                .with_context(|| format!("Column header {header:?} is not `<variable>_<height>`"))?;
            let height: f64 = height
                .parse()
                .with_context(|| format!("Could not parse height from column header {header:?}"))?;
            keys.push((WeatherVariable::try_from(name)?, height * uc::M));
        }

        let mut wt = Self::empty();
        let mut values: Vec<Vec<f64>> = vec![Vec::new(); keys.len()];
        for result in rdr.records() {
            let record = result?;
            let time = record.get(0).with_context(|| format_dbg!())?;
            wt.time.push(
                DateTime::parse_from_rfc3339(time.trim())
                    .with_context(|| format!("Could not parse timestamp {time:?}"))?
                    .with_timezone(&Utc),
            );
            for (i, cell) in record.iter().skip(1).enumerate() {
                values[i].push(
                    cell.trim()
                        .parse()
                        .with_context(|| format!("Could not parse value {cell:?}"))?,
                );
            }
        }
        for ((variable, height), values) in keys.into_iter().zip(values) {
            wt.push_column(variable, height, values)?;
        }
        ensure!(
            !wt.time.is_empty(),
            "Invalid weather file {filepath:?}; WeatherTrace is empty"
        );
        Ok(wt)
    }

    /// Save weather trace to csv file.
    pub fn to_csv_file<P: AsRef<Path>>(&self, filepath: P) -> anyhow::Result<()> {
        let file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(filepath)?;
        let mut wrtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        let mut header = vec!["time".to_string()];
        header.extend(
            self.columns
                .iter()
                .map(|c| format!("{}_{}", c.variable, c.height.get::<si::meter>())),
        );
        wrtr.write_record(&header)?;
        for (i, time) in self.time.iter().enumerate() {
            let mut record = vec![time.to_rfc3339()];
            record.extend(self.columns.iter().map(|c| c.values[i].to_string()));
            wrtr.write_record(&record)?;
        }
        wrtr.flush()?;
        Ok(())
    }
}

impl Default for WeatherTrace {
    /// One synthetic day of hourly weather at a flat onshore site.
    fn default() -> Self {
        let start = DateTime::parse_from_rfc3339("2020-01-01T00:00:00+00:00")
            .unwrap()
            .with_timezone(&Utc);
        let n = 24;
        let time: Vec<DateTime<Utc>> = (0..n)
            .map(|i| start + chrono::Duration::hours(i as i64))
            .collect();
        // diurnal-ish wind speed cycle, stronger aloft
        let wind_speed_10: Vec<f64> = (0..n)
            .map(|i| 6.0 + 3.0 * (2.0 * std::f64::consts::PI * i as f64 / n as f64).sin())
            .collect();
        let wind_speed_80: Vec<f64> = wind_speed_10.iter().map(|v| v * 1.3).collect();
        let mut wt = Self {
            time,
            columns: Vec::new(),
        };
        wt.push_column(WeatherVariable::WindSpeed, 10.0 * uc::M, wind_speed_10)
            .unwrap();
        wt.push_column(WeatherVariable::WindSpeed, 80.0 * uc::M, wind_speed_80)
            .unwrap();
        wt.push_column(WeatherVariable::Temperature, 2.0 * uc::M, vec![281.15; n])
            .unwrap();
        wt.push_column(WeatherVariable::Pressure, 0.0 * uc::M, vec![101_325.0; n])
            .unwrap();
        wt.push_column(WeatherVariable::RoughnessLength, 0.0 * uc::M, vec![0.15; n])
            .unwrap();
        wt.init().unwrap();
        wt
    }
}
