use std::path::PathBuf;

use clap::Parser;
use htmlstream::{Event, Events, HtmlParser, Slot, StreamError};
use smol::{fs::File, stream::StreamExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// An HTML document to tokenize
    location: PathBuf,
}

fn main() -> Result<(), StreamError> {
    let args = Args::parse();
    smol::block_on(async {
        let file = File::open(args.location).await?;
        let mut tag_buf = [0u8; 128];
        let mut text_buf = [0u8; 4096];
        let mut parser = HtmlParser::new();
        parser.set_lowercase(Slot::TagName, true);
        parser.bind(Slot::TagName, &mut tag_buf);
        parser.bind(Slot::InnerText, &mut text_buf);
        let mut events = Events::new(file, parser);
        while let Some(event) = events.next().await {
            match event? {
                Event::Tag { name, closing } => {
                    let kind = if closing { "close" } else { "open" };
                    println!("{kind}: {}", String::from_utf8_lossy(&name));
                }
                Event::Text(text) => {
                    println!("text: {:?}", String::from_utf8_lossy(&text));
                }
            }
        }
        Ok(())
    })
}
