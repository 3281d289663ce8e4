//! Slide-deck text extraction. A .pptx file is a zip archive; each slide is
//! an XML part under ppt/slides/. Text lives in <a:t> runs inside <p:sp>
//! shape blocks, which is all we pull out here.

use anyhow::{Context, Result};
use std::io::{Read, Seek};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideText {
    /// 1-based slide number taken from the part name, not the zip order.
    pub index: usize,
    /// Non-empty text per shape, in document order within the slide.
    pub texts: Vec<String>,
}

pub fn extract_deck_file(path: &Path) -> Result<Vec<SlideText>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("open deck file failed: {}", path.display()))?;
    extract_deck(std::io::BufReader::new(file))
}

pub fn extract_deck<R: Read + Seek>(reader: R) -> Result<Vec<SlideText>> {
    let mut archive = zip::ZipArchive::new(reader).context("open deck archive failed")?;

    let mut slides: Vec<(usize, usize)> = Vec::new();
    for i in 0..archive.len() {
        let name = {
            let entry = archive.by_index(i).context("open deck entry failed")?;
            entry.name().to_string()
        };
        if let Some(number) = slide_number(&name) {
            slides.push((number, i));
        }
    }
    anyhow::ensure!(
        !slides.is_empty(),
        "archive contains no ppt/slides entries; not a presentation?"
    );
    slides.sort_unstable();

    let mut out = Vec::with_capacity(slides.len());
    for (number, entry_idx) in slides {
        let mut xml = String::new();
        let mut entry = archive.by_index(entry_idx).context("open slide entry failed")?;
        entry
            .read_to_string(&mut xml)
            .with_context(|| format!("read slide {number} failed"))?;

        out.push(SlideText {
            index: number,
            texts: shape_texts(&xml),
        });
    }
    Ok(out)
}

fn slide_number(entry_name: &str) -> Option<usize> {
    let rest = entry_name.strip_prefix("ppt/slides/slide")?;
    let digits = rest.strip_suffix(".xml")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn shape_texts(xml: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = xml;
    while let Some(start) = rest.find("<p:sp>") {
        let after = &rest[start + "<p:sp>".len()..];
        let Some(end) = after.find("</p:sp>") else {
            break;
        };
        let text = shape_text(&after[..end]);
        if !text.trim().is_empty() {
            out.push(text);
        }
        rest = &after[end + "</p:sp>".len()..];
    }
    out
}

// Paragraphs are joined with newlines; runs within a paragraph concatenate.
fn shape_text(block: &str) -> String {
    let mut paragraphs = Vec::new();
    let mut rest = block;
    while let Some(start) = rest.find("<a:p>") {
        let after = &rest[start + "<a:p>".len()..];
        let Some(end) = after.find("</a:p>") else {
            break;
        };
        paragraphs.push(paragraph_text(&after[..end]));
        rest = &after[end + "</a:p>".len()..];
    }
    paragraphs.join("\n")
}

fn paragraph_text(paragraph: &str) -> String {
    let mut out = String::new();
    let mut rest = paragraph;
    while let Some(start) = rest.find("<a:t") {
        rest = &rest[start + "<a:t".len()..];
        let Some(gt) = rest.find('>') else {
            break;
        };
        let head = &rest[..gt];
        // Only the literal <a:t> run element; skip <a:tab/>, <a:tcPr> and
        // friends that share the prefix, and empty self-closing runs.
        let is_run = head.is_empty() || head.starts_with(' ');
        let self_closing = head.ends_with('/');
        rest = &rest[gt + 1..];
        if !is_run || self_closing {
            continue;
        }
        let Some(close) = rest.find("</a:t>") else {
            break;
        };
        out.push_str(&decode_entities(&rest[..close]));
        rest = &rest[close + "</a:t>".len()..];
    }
    out
}

fn decode_entities(raw: &str) -> String {
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn deck(entries: &[(&str, &str)]) -> Cursor<Vec<u8>> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        writer.start_file("[Content_Types].xml", options).unwrap();
        writer.write_all(b"<Types/>").unwrap();
        for (name, body) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap()
    }

    fn slide(shapes: &[&[&str]]) -> String {
        let mut xml = String::from("<p:sld><p:cSld><p:spTree>");
        for paragraphs in shapes {
            xml.push_str("<p:sp><p:txBody>");
            for paragraph in *paragraphs {
                xml.push_str("<a:p><a:r><a:t>");
                xml.push_str(paragraph);
                xml.push_str("</a:t></a:r></a:p>");
            }
            xml.push_str("</p:txBody></p:sp>");
        }
        xml.push_str("</p:spTree></p:cSld></p:sld>");
        xml
    }

    #[test]
    fn extracts_shape_text_per_slide() {
        let one = slide(&[&["Title"], &["Body line"]]);
        let two = slide(&[&["Second slide"]]);
        let archive = deck(&[
            ("ppt/slides/slide1.xml", one.as_str()),
            ("ppt/slides/slide2.xml", two.as_str()),
        ]);

        let slides = extract_deck(archive).unwrap();
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].index, 1);
        assert_eq!(slides[0].texts, ["Title", "Body line"]);
        assert_eq!(slides[1].texts, ["Second slide"]);
    }

    #[test]
    fn slides_sort_by_number_not_entry_order() {
        let ten = slide(&[&["ten"]]);
        let two = slide(&[&["two"]]);
        let archive = deck(&[
            ("ppt/slides/slide10.xml", ten.as_str()),
            ("ppt/slides/slide2.xml", two.as_str()),
        ]);

        let slides = extract_deck(archive).unwrap();
        assert_eq!(slides[0].index, 2);
        assert_eq!(slides[1].index, 10);
    }

    #[test]
    fn paragraphs_join_with_newlines_and_runs_concatenate() {
        let xml = "<p:sp><p:txBody>\
                   <a:p><a:r><a:t>Hello</a:t></a:r><a:r><a:t> world</a:t></a:r></a:p>\
                   <a:p><a:r><a:t>Next line</a:t></a:r></a:p>\
                   </p:txBody></p:sp>";
        assert_eq!(shape_texts(xml), ["Hello world\nNext line"]);
    }

    #[test]
    fn whitespace_only_shapes_are_skipped() {
        let xml = slide(&[&["   "], &["kept"]]);
        assert_eq!(shape_texts(&xml), ["kept"]);
    }

    #[test]
    fn entities_are_decoded() {
        let xml = "<p:sp><a:p><a:r><a:t>Q&amp;A &lt;draft&gt;</a:t></a:r></a:p></p:sp>";
        assert_eq!(shape_texts(xml), ["Q&A <draft>"]);
    }

    #[test]
    fn preserve_space_runs_and_lookalike_tags_are_handled() {
        let xml = "<p:sp><a:p>\
                   <a:r><a:t xml:space=\"preserve\"> lead</a:t></a:r>\
                   <a:tab/>\
                   <a:r><a:t/></a:r>\
                   <a:r><a:t>tail</a:t></a:r>\
                   </a:p></p:sp>";
        assert_eq!(shape_texts(xml), [" leadtail"]);
    }

    #[test]
    fn archive_without_slides_is_an_error() {
        let archive = deck(&[("ppt/notes/notes1.xml", "<x/>")]);
        assert!(extract_deck(archive).is_err());
    }

    #[test]
    fn slide_number_parses_only_slide_parts() {
        assert_eq!(slide_number("ppt/slides/slide1.xml"), Some(1));
        assert_eq!(slide_number("ppt/slides/slide12.xml"), Some(12));
        assert_eq!(slide_number("ppt/slides/_rels/slide1.xml.rels"), None);
        assert_eq!(slide_number("ppt/slideMasters/slideMaster1.xml"), None);
        assert_eq!(slide_number("ppt/slides/slide.xml"), None);
    }
}
