use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use mailsift_core::{EmailSet, decode_cfemail, extract_emails, is_valid_email, scan_html};

/// Synthetic page body with a sprinkle of addresses every few paragraphs.
fn synthetic_body(paragraphs: usize) -> String {
    let mut body = String::new();
    for i in 0..paragraphs {
        body.push_str("Lorem ipsum dolor sit amet, consectetur adipiscing elit. ");
        if i % 8 == 0 {
            body.push_str(&format!("Contact person-{i}@example.com for details. "));
        }
        if i % 13 == 0 {
            body.push_str(&format!("Or person-{i}(at)example.org instead. "));
        }
    }
    body
}

fn bench_extract(c: &mut Criterion) {
    let small = synthetic_body(50);
    let large = synthetic_body(5_000);

    let mut group = c.benchmark_group("extract_emails");

    group.bench_with_input(BenchmarkId::new("small", "~3KB"), &small, |b, body| {
        b.iter(|| {
            let set = EmailSet::new();
            extract_emails(&set, black_box(body.as_bytes()))
        })
    });

    group.bench_with_input(BenchmarkId::new("large", "~300KB"), &large, |b, body| {
        b.iter(|| {
            let set = EmailSet::new();
            extract_emails(&set, black_box(body.as_bytes()))
        })
    });

    group.finish();
}

fn bench_scan_fixture(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/contact.html").unwrap();

    c.bench_function("scan_html_fixture", |b| {
        b.iter(|| {
            let set = EmailSet::new();
            scan_html(&set, black_box(&html))
        })
    });
}

fn bench_decode(c: &mut Criterion) {
    // key 0x1a over "john.doe@example.com"
    let mut encoded = String::from("1a");
    for byte in b"john.doe@example.com" {
        encoded.push_str(&format!("{:02x}", byte ^ 0x1a));
    }

    c.bench_function("decode_cfemail", |b| b.iter(|| decode_cfemail(black_box(&encoded))));
}

fn bench_validate(c: &mut Criterion) {
    c.bench_function("is_valid_email", |b| {
        b.iter(|| {
            black_box(is_valid_email(black_box("john.doe@mail.example.com")))
                & black_box(is_valid_email(black_box("sprite@2x.png")))
        })
    });
}

criterion_group!(
    benches,
    bench_extract,
    bench_scan_fixture,
    bench_decode,
    bench_validate
);
criterion_main!(benches);
