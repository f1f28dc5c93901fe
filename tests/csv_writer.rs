use woo_export::testing::sample_customer_records;
use woo_export::{CsvWriter, Record};
use std::io::{self, Write};

fn email(addr: &str) -> Option<Record> {
    Some(Record::new().with("Email", addr))
}

#[test]
fn render_empty_writes_nothing() -> anyhow::Result<()> {
    let mut out = Vec::new();
    let rows = CsvWriter::new().render(&mut out, &[])?;
    assert_eq!(rows, 0);
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn render_single_record_then_null() -> anyhow::Result<()> {
    let text = CsvWriter::new().render_to_string(&[email("hello@example.com"), None])?;
    assert_eq!(text, "Email\n\"hello@example.com\";\n");
    Ok(())
}

#[test]
fn render_two_records_under_one_header() -> anyhow::Result<()> {
    let text = CsvWriter::new().render_to_string(&[email("a@b.com"), email("c@d.com")])?;
    assert_eq!(text, "Email\n\"a@b.com\";\n\"c@d.com\";\n");
    Ok(())
}

#[test]
fn only_nulls_write_nothing() -> anyhow::Result<()> {
    let text = CsvWriter::new().render_to_string(&[None, None])?;
    assert_eq!(text, "");
    Ok(())
}

#[test]
fn leading_null_does_not_affect_header() -> anyhow::Result<()> {
    let records = vec![
        None,
        Some(Record::new().with("Email", "x@y.z").with("Name", "X")),
        None,
    ];
    let mut out = Vec::new();
    let rows = CsvWriter::new().render(&mut out, &records)?;
    assert_eq!(rows, 1);
    assert_eq!(String::from_utf8(out)?, "Email;Name\n\"x@y.z\";\"X\";\n");
    Ok(())
}

#[test]
fn multi_column_rows_terminate_every_value() -> anyhow::Result<()> {
    let text = CsvWriter::new().render_to_string(&sample_customer_records())?;
    assert_eq!(
        text,
        "Email;First name;Last name\n\
         \"hello@example.com\";\"Jane\";\"Doe\";\n\
         \"bob@example.com\";\"Bob\";\"O\"\"Neil\";\n\
         \"carol@example.com\";\"Carol\";\"Smith; Jr.\";\n"
    );
    Ok(())
}

#[test]
fn missing_columns_are_empty_and_extras_dropped() -> anyhow::Result<()> {
    let records = vec![
        Some(Record::new().with("Email", "a@b.com").with("Name", "A")),
        Some(Record::new().with("Email", "c@d.com")),
        Some(
            Record::new()
                .with("Phone", "555")
                .with("Name", "E")
                .with("Email", "e@f.com"),
        ),
    ];
    let text = CsvWriter::new().render_to_string(&records)?;
    assert_eq!(
        text,
        "Email;Name\n\"a@b.com\";\"A\";\n\"c@d.com\";\"\";\n\"e@f.com\";\"E\";\n"
    );
    Ok(())
}

#[test]
fn header_names_quoted_only_when_needed() -> anyhow::Result<()> {
    let records = vec![Some(Record::new().with("Plain", "1").with("a;b", "2"))];
    let text = CsvWriter::new().render_to_string(&records)?;
    assert_eq!(text, "Plain;\"a;b\"\n\"1\";\"2\";\n");
    Ok(())
}

#[test]
fn empty_values_are_quoted() -> anyhow::Result<()> {
    let text = CsvWriter::new().render_to_string(&[email("")])?;
    assert_eq!(text, "Email\n\"\";\n");
    Ok(())
}

#[test]
fn columnless_first_record_writes_nothing() -> anyhow::Result<()> {
    let records = vec![Some(Record::new()), email("a@b.com")];
    let mut out = Vec::new();
    let rows = CsvWriter::new().render(&mut out, &records)?;
    assert_eq!(rows, 0);
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn without_headers() -> anyhow::Result<()> {
    let text = CsvWriter::new()
        .has_headers(false)
        .render_to_string(&[email("a@b.com"), None, email("c@d.com")])?;
    assert_eq!(text, "\"a@b.com\";\n\"c@d.com\";\n");
    Ok(())
}

#[test]
fn rendering_twice_is_identical() -> anyhow::Result<()> {
    let writer = CsvWriter::new();
    let records = sample_customer_records();
    let first = writer.render_to_string(&records)?;
    let second = writer.render_to_string(&records)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn render_appends_to_existing_sink_content() -> anyhow::Result<()> {
    let mut out = b"prefix\n".to_vec();
    CsvWriter::new().render(&mut out, &[email("a@b.com")])?;
    assert_eq!(String::from_utf8(out)?, "prefix\nEmail\n\"a@b.com\";\n");
    Ok(())
}

struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "client went away"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_errors_propagate() {
    let result = CsvWriter::new().render(&mut BrokenSink, &[email("a@b.com")]);
    let err = result.expect_err("broken sink must fail");
    assert!(format!("{err:?}").contains("client went away"));
}

#[test]
fn empty_input_never_touches_sink() -> anyhow::Result<()> {
    let rows = CsvWriter::new().render(&mut BrokenSink, &[None])?;
    assert_eq!(rows, 0);
    Ok(())
}

#[derive(Default)]
struct CountingSink {
    bytes: Vec<u8>,
    writes: usize,
    flushes: usize,
}

impl Write for CountingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes += 1;
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

#[test]
fn sink_is_flushed_once_per_render() -> anyhow::Result<()> {
    let records: Vec<Option<Record>> = (0..100)
        .map(|i| if i % 10 == 0 { None } else { email(&format!("user{i}@example.com")) })
        .collect();
    let mut sink = CountingSink::default();
    let rows = CsvWriter::new().render(&mut sink, &records)?;
    assert_eq!(rows, 90);
    assert_eq!(sink.flushes, 1);
    // header plus one write per data line
    assert_eq!(sink.writes, 91);
    let text = String::from_utf8(sink.bytes)?;
    assert_eq!(text.lines().count(), 91);
    assert!(text.ends_with("\"user99@example.com\";\n"));
    Ok(())
}

#[test]
fn render_stdout_reports_rows() -> anyhow::Result<()> {
    let rows = CsvWriter::new().render_stdout(&[email("hello@example.com"), None])?;
    assert_eq!(rows, 1);
    assert_eq!(CsvWriter::new().render_stdout(&[])?, 0);
    Ok(())
}
