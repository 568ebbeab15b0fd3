use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dsl_status::{extract_record, DataKey, FieldDictionary, PortTable, SectionMap};

const STATUS: &str = "
================================================================
    xDSL Training Status:   Showtime
                    Mode:   G.DMT Annex A
            Traffic Type:   ATM Mode
             Link Uptime:   0 day: 22 hours: 9 minutes
================================================================
                             Upstream         Downstream
               Line Rate:    0.512 Mbps       1.536 Mbps
    Actual Net Data Rate:    0.448 Mbps       1.152 Mbps
            Actual Delay:    8 ms             8 ms
              SNR Margin:    25.0 dB          29.3 dB
              Actual INP:    0.0 symbols      0.0 symbols
          Transmit Power:    12.1 dBm         19.4 dBm
           Recieve Power:    3.2 dBm          -1.3 dBm
       Total Attenuation:    13.5 dB          24.0 dB
Attainable Net Data Rate:    1.024 Mbps       12.288 Mbps
================================================================
                              Upstream         Downstream
              HEC Errors:    0                0
              OCD Errors:    0                0
              LCD Errors:    0                0
";

/// Benchmark splitting the raw dump into sections
fn bench_split(c: &mut Criterion) {
    c.bench_function("split_sections", |b| {
        b.iter(|| black_box(SectionMap::split(black_box(STATUS)).unwrap()));
    });
}

/// Benchmark parsing the port table
fn bench_port_table(c: &mut Criterion) {
    let sections = SectionMap::split(STATUS).unwrap();

    c.bench_function("parse_port_table", |b| {
        b.iter(|| black_box(PortTable::parse(black_box(&sections.port)).unwrap()));
    });
}

/// Benchmark extracting every selectable key from a parsed table
fn bench_extract_all(c: &mut Criterion) {
    let sections = SectionMap::split(STATUS).unwrap();
    let table = PortTable::parse(&sections.port).unwrap();
    let dict = FieldDictionary::standard();
    let keys: Vec<DataKey> = dict.choices().iter().map(|k| k.parse().unwrap()).collect();

    c.bench_function("extract_all_keys", |b| {
        b.iter(|| black_box(extract_record(&table, &dict, black_box(&keys)).unwrap()));
    });
}

criterion_group!(benches, bench_split, bench_port_table, bench_extract_all);
criterion_main!(benches);
