//! Thin adapter for feeding the parser from an async byte source. All the
//! tokenization lives in [`HtmlParser`]; this just pumps bytes and turns
//! region boundaries into owned events.

use std::{
    io,
    pin::Pin,
    task::{Context, Poll},
};

use smol::{io::AsyncRead, stream::Stream};

use crate::{Flag, HtmlParser, Slot};

const CHUNK_SIZE: usize = 4096;

#[derive(thiserror::Error, Debug)]
pub enum StreamError {
    #[error(transparent)]
    IoError(#[from] io::Error),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Event {
    /// A tag finished; `name` is whatever the bound tag-name slot held,
    /// including the leading `/` of closing tags.
    Tag { name: Vec<u8>, closing: bool },
    /// An inner-text region closed at a `<`. Only emitted while an
    /// inner-text buffer is bound.
    Text(Vec<u8>),
}

#[must_use]
#[pin_project::pin_project]
pub struct Events<'a, R> {
    #[pin]
    reader: R,
    parser: HtmlParser<'a>,
    chunk: Box<[u8]>,
    pos: usize,
    end: usize,
    // whether any byte landed in the inner-text slot since the last
    // emitted Text; the slot itself keeps its content across tags
    text_pending: bool,
}

impl<'a, R: AsyncRead + Unpin> Events<'a, R> {
    /// Bind whichever slots you care about on `parser` before handing it
    /// over; unbound slots simply produce no events.
    pub fn new(reader: R, parser: HtmlParser<'a>) -> Self {
        Self {
            reader,
            parser,
            chunk: vec![0; CHUNK_SIZE].into_boxed_slice(),
            pos: 0,
            end: 0,
            text_pending: false,
        }
    }
}

impl<'a, R: AsyncRead + Unpin> Stream for Events<'a, R> {
    type Item = Result<Event, StreamError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            while *this.pos < *this.end {
                let byte = this.chunk[*this.pos];
                *this.pos += 1;
                this.parser.feed(byte);
                if this.parser.is_in(Flag::InnerText) {
                    *this.text_pending = true;
                } else if this.parser.is_in(Flag::TagBeginning) && *this.text_pending {
                    // an inner-text region just closed at this `<`
                    *this.text_pending = false;
                    let text = this.parser.slice(Slot::InnerText);
                    if !text.is_empty() {
                        return Poll::Ready(Some(Ok(Event::Text(text.to_vec()))));
                    }
                }
                if this.parser.is_in(Flag::TagEnd) {
                    return Poll::Ready(Some(Ok(Event::Tag {
                        name: this.parser.slice(Slot::TagName).to_vec(),
                        closing: this.parser.is_in(Flag::ClosingTag),
                    })));
                }
            }
            match this.reader.as_mut().poll_read(cx, this.chunk) {
                Poll::Ready(Ok(0)) => return Poll::Ready(None),
                Poll::Ready(Ok(n)) => {
                    *this.pos = 0;
                    *this.end = n;
                }
                Poll::Ready(Err(err)) => return Poll::Ready(Some(Err(err.into()))),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use smol::{io::Cursor, stream::StreamExt};

    use super::*;

    fn tag(name: &[u8], closing: bool) -> Event {
        Event::Tag {
            name: name.to_vec(),
            closing,
        }
    }

    fn collect(document: &str) -> Vec<Event> {
        let mut tag_buf = [0u8; 32];
        let mut text_buf = [0u8; 64];
        let mut parser = HtmlParser::new();
        parser.bind(Slot::TagName, &mut tag_buf);
        parser.bind(Slot::InnerText, &mut text_buf);
        let mut events = Events::new(Cursor::new(document.as_bytes().to_vec()), parser);
        smol::block_on(async {
            let mut out = Vec::new();
            while let Some(event) = events.next().await {
                out.push(event.unwrap());
            }
            out
        })
    }

    #[test]
    fn empty() {
        assert!(collect("").is_empty());
    }

    #[test]
    fn tags_and_text() {
        assert_eq!(
            collect("a<b c=1>d</b>"),
            vec![
                Event::Text(b"a".to_vec()),
                tag(b"b", false),
                Event::Text(b"d".to_vec()),
                tag(b"/b", true),
            ]
        );
    }

    #[test]
    fn script_body_produces_no_events() {
        assert_eq!(
            collect("<script>x<y>z</script>"),
            vec![tag(b"script", false), tag(b"/script", true)]
        );
    }

    #[test]
    fn adjacent_tags_do_not_repeat_text() {
        // the inner-text slot keeps "x" until the next region begins, but no
        // region closes between `</b>` and `<c>`, so no second Text appears
        assert_eq!(
            collect("<b>x</b><c>"),
            vec![
                tag(b"b", false),
                Event::Text(b"x".to_vec()),
                tag(b"/b", true),
                tag(b"c", false),
            ]
        );
    }

    #[test]
    fn trailing_text_is_dropped_at_eof() {
        // an inner-text region only closes at `<`; EOF leaves it open
        assert_eq!(collect("<b>tail"), vec![tag(b"b", false)]);
    }

    #[test]
    fn unterminated_tag_is_dropped_at_eof() {
        // same contract for tags: no `>` before EOF, no event
        assert!(collect("<b").is_empty());
    }
}
