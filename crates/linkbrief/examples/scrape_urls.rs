//! Example: Scrape live pages and display their previews
//!
//! Run with: cargo run -p linkbrief --example scrape_urls
//!
//! Set OPENAI_API_KEY to also print an AI summary for each page.

use linkbrief::{Pipeline, WebMetadata};

struct Case {
    url: &'static str,
    description: &'static str,
    expect_title: &'static str,
}

const CASES: &[Case] = &[
    Case {
        url: "example.com",
        description: "Bare domain, scheme added",
        expect_title: "Example Domain",
    },
    Case {
        url: "https://httpbin.org/html",
        description: "Page without a <title>, falls back to the URL",
        expect_title: "https://httpbin.org/html",
    },
    Case {
        url: "https://www.rust-lang.org",
        description: "Page with Open Graph tags",
        expect_title: "Rust",
    },
];

#[tokio::main]
async fn main() {
    println!("LinkBrief Scrape Examples");
    println!("=========================\n");

    let mut builder = Pipeline::builder();
    let summarize = match std::env::var("OPENAI_API_KEY") {
        Ok(key) => {
            builder = builder.api_key(key);
            true
        }
        Err(_) => false,
    };
    let pipeline = match builder.build() {
        Ok(pipeline) => pipeline,
        Err(e) => {
            println!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut passed = 0;
    let mut failed = 0;

    for (i, case) in CASES.iter().enumerate() {
        println!("{}. {}", i + 1, case.description);
        println!("   URL: {}", case.url);

        match pipeline.scrape(case.url).await {
            Ok(metadata) => {
                print_preview(&metadata);
                if summarize {
                    match pipeline.scrape_and_summarize(case.url).await {
                        Ok(brief) => println!("   Summary: {}", brief.summary),
                        Err(e) => println!("   Summary error: {}", e),
                    }
                }

                if metadata.title.contains(case.expect_title) {
                    println!("   ✓ PASS\n");
                    passed += 1;
                } else {
                    println!("   Expected title to contain '{}'", case.expect_title);
                    println!("   ✗ FAIL\n");
                    failed += 1;
                }
            }
            Err(e) => {
                println!("   Error: {}", e);
                println!("   ✗ FAIL\n");
                failed += 1;
            }
        }
    }

    println!("=========================");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed > 0 {
        std::process::exit(1);
    }
}

fn print_preview(metadata: &WebMetadata) {
    println!("   Title: {}", metadata.title);
    if !metadata.description.is_empty() {
        println!("   Description: {}", metadata.description);
    }
    if let Some(ref image) = metadata.image_url {
        println!("   Image: {}", image);
    }
    if let Some(ref favicon) = metadata.favicon_url {
        println!("   Favicon: {}", favicon);
    }

    let preview: String = metadata.content.chars().take(100).collect();
    println!(
        "   Preview: {}{}",
        preview,
        if metadata.content.chars().count() > 100 { "..." } else { "" }
    );
}
