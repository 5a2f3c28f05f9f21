use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Builder, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform value in `[lo, hi)`, rounded to one decimal.
    fn between(&mut self, lo: f64, hi: f64) -> f64 {
        ((lo + (hi - lo) * self.next_f64()) * 10.0).round() / 10.0
    }
}

/// Property columns: (header, unit, low, high).
const PROPERTIES: [(&str, &str, f64, f64); 5] = [
    ("Tensile Strength", "MPa", 20.0, 90.0),
    ("Young's Modulus", "MPa", 800.0, 4000.0),
    ("Elongation at Break", "%", 2.0, 300.0),
    ("Flexural Strength", "MPa", 30.0, 130.0),
    ("Density", "g/cm³", 0.9, 1.6),
];

/// (technology, category, base name)
const FAMILIES: [(&str, &str, &str); 8] = [
    ("FDM", "Standard", "PLA"),
    ("FDM", "Engineering", "ABS"),
    ("FDM", "Flexible", "TPU"),
    ("SLA", "Standard", "Standard Resin"),
    ("SLA", "Engineering", "Tough Resin"),
    ("SLS", "Engineering", "PA12"),
    ("MJF", "Engineering", "PA11"),
    ("PolyJet", "Flexible", "Agilus"),
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut names = Vec::new();
    let mut technologies = Vec::new();
    let mut categories = Vec::new();
    let mut columns: Vec<Float64Builder> = PROPERTIES.iter().map(|_| Float64Builder::new()).collect();
    let mut csv_rows: Vec<Vec<String>> = Vec::new();

    for (tech, cat, base) in FAMILIES {
        for grade in 1..=3 {
            let name = format!("{base} G{grade}");
            let mut row = vec![name.clone(), tech.to_string(), cat.to_string()];
            for ((_, _, lo, hi), builder) in PROPERTIES.iter().zip(columns.iter_mut()) {
                let value = rng.between(*lo, *hi);
                builder.append_value(value);
                row.push(value.to_string());
            }
            names.push(name);
            technologies.push(tech);
            categories.push(cat);
            csv_rows.push(row);
        }
    }

    // ---- Units CSV (headerless) ----
    let mut units = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path("Material Units.csv")
        .context("creating units file")?;
    for (header, unit, _, _) in PROPERTIES {
        units.write_record([header, unit])?;
    }
    units.flush()?;

    // ---- Properties CSV ----
    let mut headers = vec!["Material Name", "Technology", "Category"];
    headers.extend(PROPERTIES.iter().map(|(h, ..)| *h));
    let mut props = csv::Writer::from_path("Material Properties.csv").context("creating properties CSV")?;
    props.write_record(&headers)?;
    for row in &csv_rows {
        props.write_record(row)?;
    }
    props.flush()?;

    // ---- Properties Parquet ----
    let mut fields = vec![
        Field::new("Material Name", DataType::Utf8, false),
        Field::new("Technology", DataType::Utf8, false),
        Field::new("Category", DataType::Utf8, false),
    ];
    fields.extend(
        PROPERTIES
            .iter()
            .map(|(h, ..)| Field::new(*h, DataType::Float64, false)),
    );
    let schema = Arc::new(Schema::new(fields));

    let mut arrays: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(names.iter().map(String::as_str).collect::<Vec<_>>())),
        Arc::new(StringArray::from(technologies)),
        Arc::new(StringArray::from(categories)),
    ];
    arrays.extend(columns.iter_mut().map(|b| Arc::new(b.finish()) as ArrayRef));

    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;
    let file = std::fs::File::create("Material Properties.parquet").context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch)?;
    writer.close()?;

    println!(
        "Wrote {} materials with {} properties to Material Properties.{{csv,parquet}} and Material Units.csv",
        names.len(),
        PROPERTIES.len()
    );
    Ok(())
}
