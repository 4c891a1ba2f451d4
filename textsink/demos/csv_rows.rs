use textsink::{write::text::ascii_digits, AdaptiveWriter, Error, Utf8};

struct City {
    name: &'static str,
    country: &'static str,
    population: u64,
}

const CITIES: &[City] = &[
    City {
        name: "Zürich",
        country: "Switzerland",
        population: 421_878,
    },
    City {
        name: "東京",
        country: "Japan",
        population: 13_960_000,
    },
    City {
        name: "Washington, D.C.",
        country: "United States",
        population: 689_545,
    },
];

fn main() {
    if let Err(err) = main_err() {
        eprintln!("error: {err}");
    }
}

fn main_err() -> Result<(), Error> {
    let stdout = std::io::stdout();
    let mut writer = AdaptiveWriter::new(stdout.lock(), Utf8);

    writer.write_str("name,country,population\n")?;
    for city in CITIES {
        write_field(&mut writer, city.name)?;
        writer.write_char(',')?;
        write_field(&mut writer, city.country)?;
        writer.write_char(',')?;
        ascii_digits(&mut writer, city.population)?;
        writer.write_char('\n')?;
    }

    writer.flush()
}

/// Writes a CSV field, quoting it when it contains a delimiter, a quote or a line break.
fn write_field(
    writer: &mut AdaptiveWriter<impl std::io::Write, Utf8>,
    field: &str,
) -> Result<(), Error> {
    if !field.contains([',', '"', '\n', '\r']) {
        return writer.write_str(field);
    }

    writer.write_char('"')?;
    for (i, part) in field.split('"').enumerate() {
        if i > 0 {
            writer.write_str("\"\"")?;
        }
        writer.write_str(part)?;
    }
    writer.write_char('"')
}
