use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone};
use rand::{Rng, seq::SliceRandom};

use crate::domain::source_table::SourceTable;

const ENCODED_FLAGS: [Option<&str>; 3] = [None, Some("Y"), Some("N")];
const ENCODED_SUFFIXES: [Option<&str>; 2] = [None, Some("AUTO(ENCODE)")];
const DIST_STYLES: [&str; 6] = [
    "EVEN",
    "KEY(column)",
    "ALL",
    "AUTO(ALL)",
    "AUTO(EVEN)",
    "AUTO(KEY(column))",
];
const SORT_KEYS: [Option<&str>; 4] = [
    None,
    Some("column"),
    Some("AUTO(SORTKEY)"),
    Some("AUTO(SORTKEY(column))"),
];
const SORT_KEY_ENCODINGS: [Option<&str>; 4] = [None, Some("none"), Some("az64"), Some("lzo")];
const RISK_EVENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Values shared by every row of one generator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBatchContext {
    pub mock_id: i64,
    pub mock_created_at: NaiveDateTime,
    /// Denominator of `pct_used` for the whole batch.
    pub database_size: u64,
}

impl MockBatchContext {
    pub fn new<Tz: TimeZone>(now: DateTime<Tz>, rng: &mut impl Rng) -> Self {
        Self::with_database_size(now, rng.gen_range(1 << 12..=1 << 16))
    }

    pub fn with_database_size<Tz: TimeZone>(now: DateTime<Tz>, database_size: u64) -> Self {
        Self {
            mock_id: now.timestamp(),
            mock_created_at: now.naive_local(),
            database_size: database_size.max(1),
        }
    }
}

/// One fabricated `svv_table_info` row.
#[derive(Debug, Clone, PartialEq)]
pub struct MockTableInfoRow {
    pub database: String,
    pub schema: String,
    pub table_id: i64,
    pub table: String,
    pub encoded: Option<String>,
    pub diststyle: String,
    pub sortkey1: Option<String>,
    pub max_varchar: i32,
    pub sortkey1_enc: Option<String>,
    pub sortkey_num: i32,
    pub size: i64,
    pub pct_used: f64,
    pub empty: i64,
    pub unsorted: Option<f64>,
    pub stats_off: f64,
    pub tbl_rows: i64,
    pub skew_sortkey1: Option<f64>,
    pub skew_rows: Option<f64>,
    pub estimated_visible_rows: i64,
    pub risk_event: Option<String>,
    pub vacuum_sort_benefit: f64,
    pub create_time: NaiveDateTime,
    pub mock_id: i64,
    pub mock_created_at: NaiveDateTime,
}

/// A typed cell of a generated row, ready to be bound to a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Text(Option<String>),
    Int(i32),
    BigInt(i64),
    Float(Option<f64>),
    Timestamp(NaiveDateTime),
}

impl MockTableInfoRow {
    pub const COLUMN_NAMES: [&'static str; 24] = [
        "database",
        "schema",
        "table_id",
        "table",
        "encoded",
        "diststyle",
        "sortkey1",
        "max_varchar",
        "sortkey1_enc",
        "sortkey_num",
        "size",
        "pct_used",
        "empty",
        "unsorted",
        "stats_off",
        "tbl_rows",
        "skew_sortkey1",
        "skew_rows",
        "estimated_visible_rows",
        "risk_event",
        "vacuum_sort_benefit",
        "create_time",
        "mock_id",
        "mock_created_at",
    ];

    pub fn generate(context: &MockBatchContext, source: &SourceTable, rng: &mut impl Rng) -> Self {
        let create_offset_seconds: i64 = rng.gen_range(1..=60);
        let create_time = context.mock_created_at - TimeDelta::seconds(create_offset_seconds);
        let table_id = derive_table_id(
            source.identity_hash(),
            context.mock_id - create_offset_seconds,
        );

        let encoded = pick(rng, &ENCODED_FLAGS).map(|flag| {
            match pick(rng, &ENCODED_SUFFIXES) {
                Some(suffix) => format!("{flag}, {suffix}"),
                None => flag.to_string(),
            }
        });
        let diststyle = DIST_STYLES[rng.gen_range(0..DIST_STYLES.len())].to_string();
        let sortkey1 = pick(rng, &SORT_KEYS).map(str::to_string);
        let has_sort_key = sortkey1.is_some();
        let max_varchar = rng.gen_range(1 << 4..=1 << 8);
        let sortkey1_enc = pick(rng, &SORT_KEY_ENCODINGS).map(str::to_string);
        let sortkey_num = if has_sort_key { rng.gen_range(1..=10) } else { 0 };

        let size: i64 = rng.gen_range(1..=1 << 12);
        let pct_used = round_to(size as f64 / context.database_size as f64, 6);
        let unsorted = has_sort_key.then(|| round_to(rng.gen_range(0.0..=100.0), 2));
        let stats_off = round_to(rng.gen_range(0.0..=100.0), 2);
        let tbl_rows = size * rng.gen_range(1_i64 << 9..=1 << 11);
        let skew_sortkey1 = has_sort_key.then(|| round_to(rng.gen_range(0.0..=10.0), 2));
        let skew_rows = rng
            .gen_bool(0.5)
            .then(|| round_to(rng.gen_range(0.0..=10.0), 2));
        let estimated_visible_rows =
            ((tbl_rows as f64 * rng.gen_range(0.75..=1.0)).floor() as i64).min(tbl_rows);
        let risk_event = rng.gen_bool(0.5).then(|| {
            let event_time = random_time_between(rng, create_time, context.mock_created_at);
            format!(
                "risk_type|{}|{}",
                rng.gen_range(1..=1000),
                event_time.format(RISK_EVENT_TIME_FORMAT)
            )
        });
        let vacuum_sort_benefit = round_to(rng.gen_range(0.0..=100.0), 2);

        Self {
            database: source.database.clone(),
            schema: source.schema.clone(),
            table_id,
            table: source.table.clone(),
            encoded,
            diststyle,
            sortkey1,
            max_varchar,
            sortkey1_enc,
            sortkey_num,
            size,
            pct_used,
            empty: 0,
            unsorted,
            stats_off,
            tbl_rows,
            skew_sortkey1,
            skew_rows,
            estimated_visible_rows,
            risk_event,
            vacuum_sort_benefit,
            create_time,
            mock_id: context.mock_id,
            mock_created_at: context.mock_created_at,
        }
    }

    pub fn value(&self, column: &str) -> Option<ColumnValue> {
        let value = match column {
            "database" => ColumnValue::Text(Some(self.database.clone())),
            "schema" => ColumnValue::Text(Some(self.schema.clone())),
            "table_id" => ColumnValue::BigInt(self.table_id),
            "table" => ColumnValue::Text(Some(self.table.clone())),
            "encoded" => ColumnValue::Text(self.encoded.clone()),
            "diststyle" => ColumnValue::Text(Some(self.diststyle.clone())),
            "sortkey1" => ColumnValue::Text(self.sortkey1.clone()),
            "max_varchar" => ColumnValue::Int(self.max_varchar),
            "sortkey1_enc" => ColumnValue::Text(self.sortkey1_enc.clone()),
            "sortkey_num" => ColumnValue::Int(self.sortkey_num),
            "size" => ColumnValue::BigInt(self.size),
            "pct_used" => ColumnValue::Float(Some(self.pct_used)),
            "empty" => ColumnValue::BigInt(self.empty),
            "unsorted" => ColumnValue::Float(self.unsorted),
            "stats_off" => ColumnValue::Float(Some(self.stats_off)),
            "tbl_rows" => ColumnValue::BigInt(self.tbl_rows),
            "skew_sortkey1" => ColumnValue::Float(self.skew_sortkey1),
            "skew_rows" => ColumnValue::Float(self.skew_rows),
            "estimated_visible_rows" => ColumnValue::BigInt(self.estimated_visible_rows),
            "risk_event" => ColumnValue::Text(self.risk_event.clone()),
            "vacuum_sort_benefit" => ColumnValue::Float(Some(self.vacuum_sort_benefit)),
            "create_time" => ColumnValue::Timestamp(self.create_time),
            "mock_id" => ColumnValue::BigInt(self.mock_id),
            "mock_created_at" => ColumnValue::Timestamp(self.mock_created_at),
            _ => return None,
        };
        Some(value)
    }
}

/// CRC-32 over the decimal identity hash followed by the decimal creation
/// epoch, kept in the unsigned 32-bit range.
pub fn derive_table_id(identity_hash: u32, create_time_epoch: i64) -> i64 {
    let checksum = crc32fast::hash(format!("{identity_hash}{create_time_epoch}").as_bytes());
    i64::from(checksum)
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

fn pick<T: Copy>(rng: &mut impl Rng, options: &[Option<T>]) -> Option<T> {
    options.choose(rng).copied().flatten()
}

fn random_time_between(
    rng: &mut impl Rng,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> NaiveDateTime {
    let span_millis = (end - start).num_milliseconds().max(0);
    start + TimeDelta::milliseconds(rng.gen_range(0..=span_millis))
}
