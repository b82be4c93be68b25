//! Bookshelf CLI Client
//!
//! Command-line front end over the catalog state container.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bookshelf_server::{
    client::{BookForm, CatalogClient, HttpBooksApi, Notification, NotificationKind, SaveOutcome},
    models::Book,
};

/// Bookshelf CLI
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(about = "CLI for the Bookshelf catalog")]
struct Args {
    /// Server base URL
    #[arg(short, long, default_value = "http://localhost:8080")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List books, optionally filtered by title or author
    List {
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one book
    Show {
        id: String,
    },

    /// Add a new book
    Add {
        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "")]
        author: String,

        /// Publication date, e.g. 2012-04-05
        #[arg(long, default_value = "")]
        published_date: String,

        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        copies: f64,
    },

    /// Edit some fields of a book
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        published_date: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        copies: Option<f64>,
    },

    /// Delete a book
    Delete {
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut client = CatalogClient::new(HttpBooksApi::new(args.api_url));

    let result = run(&mut client, args.command).await;
    for notification in client.take_notifications() {
        print_notification(&notification);
    }
    result
}

async fn run(client: &mut CatalogClient<HttpBooksApi>, command: Commands) -> anyhow::Result<()> {
    client.load().await?;

    match command {
        Commands::List { search } => {
            if let Some(search) = search {
                client.set_search(search);
            }
            for book in client.visible_books() {
                print_book(book);
            }
        }
        Commands::Show { id } => {
            let book = client.fetch(&id).await?;
            print_book(&book);
        }
        Commands::Add {
            title,
            author,
            published_date,
            copies,
        } => {
            let form = BookForm {
                title,
                author,
                published_date,
                available_copies: copies,
            };
            let book = client.create(&form).await?;
            print_book(&book);
        }
        Commands::Edit {
            id,
            title,
            author,
            published_date,
            copies,
        } => {
            let mut session = client
                .edit(&id)
                .ok_or_else(|| anyhow::anyhow!("No book with id {}", id))?;
            session.open();
            if let Some(title) = title {
                session.draft.title = title;
            }
            if let Some(author) = author {
                session.draft.author = author;
            }
            if let Some(published_date) = published_date {
                session.draft.published_date = published_date;
            }
            if let Some(copies) = copies {
                session.draft.available_copies = copies;
            }

            match client.save(&mut session).await? {
                SaveOutcome::Unchanged => println!("Nothing to change."),
                SaveOutcome::Saved(book) => print_book(&book),
            }
        }
        Commands::Delete { id } => {
            client.delete(&id).await?;
        }
    }

    Ok(())
}

fn print_book(book: &Book) {
    println!(
        "{}  {} by {} (published {}, {} available)",
        book.id, book.title, book.author, book.published_date, book.available_copies
    );
}

fn print_notification(notification: &Notification) {
    match notification.kind {
        NotificationKind::Success => println!("[ok] {}", notification.text),
        NotificationKind::Error => eprintln!("[error] {}", notification.text),
    }
}
