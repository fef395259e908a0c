use std::io;

use serde_json::ser::{CharEscape, Formatter};

use crate::options::EncodeOptions;

/// Integral floats below this magnitude print without a fraction.
const INTEGRAL_FLOAT_LIMIT: f64 = 1e15;

/// Wraps a compact or pretty formatter and applies the escaping selected by
/// [`EncodeOptions`] to every string fragment, keys included.
pub(crate) struct EscapingFormatter<F> {
    inner: F,
    options: EncodeOptions,
}

impl<F: Formatter> EscapingFormatter<F> {
    pub(crate) fn new(inner: F, options: EncodeOptions) -> Self {
        Self { inner, options }
    }

    fn escape_for(&self, ch: char) -> Option<&'static str> {
        let opts = self.options;
        match ch {
            '/' if !opts.contains(EncodeOptions::UNESCAPED_SLASHES) => Some("\\/"),
            '<' if opts.contains(EncodeOptions::HEX_TAG) => Some("\\u003C"),
            '>' if opts.contains(EncodeOptions::HEX_TAG) => Some("\\u003E"),
            '&' if opts.contains(EncodeOptions::HEX_AMP) => Some("\\u0026"),
            '\'' if opts.contains(EncodeOptions::HEX_APOS) => Some("\\u0027"),
            _ => None,
        }
    }
}

fn write_unicode_escape<W>(writer: &mut W, ch: char) -> io::Result<()>
where
    W: ?Sized + io::Write,
{
    let mut units = [0u16; 2];
    for unit in ch.encode_utf16(&mut units) {
        write!(writer, "\\u{:04x}", unit)?;
    }
    Ok(())
}

impl<F: Formatter> Formatter for EscapingFormatter<F> {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let integral = value.fract() == 0.0 && value.abs() < INTEGRAL_FLOAT_LIMIT;
        if integral && !self.options.contains(EncodeOptions::PRESERVE_ZERO_FRACTION) {
            if value == 0.0 && value.is_sign_negative() {
                return writer.write_all(b"-0");
            }
            return write!(writer, "{}", value as i64);
        }
        self.inner.write_f64(writer, value)
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let escape_unicode = !self.options.contains(EncodeOptions::UNESCAPED_UNICODE);
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            let escape = self.escape_for(ch);
            if escape.is_none() && !(escape_unicode && !ch.is_ascii()) {
                continue;
            }
            if start < idx {
                self.inner
                    .write_string_fragment(writer, &fragment[start..idx])?;
            }
            match escape {
                Some(seq) => writer.write_all(seq.as_bytes())?,
                None => write_unicode_escape(writer, ch)?,
            }
            start = idx + ch.len_utf8();
        }
        if start < fragment.len() {
            self.inner.write_string_fragment(writer, &fragment[start..])?;
        }
        Ok(())
    }

    fn write_char_escape<W>(&mut self, writer: &mut W, char_escape: CharEscape) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match char_escape {
            CharEscape::Quote if self.options.contains(EncodeOptions::HEX_QUOT) => {
                writer.write_all(b"\\u0022")
            }
            other => self.inner.write_char_escape(writer, other),
        }
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn end_object_key<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_key(writer)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_value(writer)
    }
}
