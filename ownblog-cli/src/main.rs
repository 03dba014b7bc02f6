use std::process;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use ownblog_client::{
    ApiClient, Blog, ClientError, Comment, FileTokenStore, ObjectId, Session, Tag, TokenStore,
    User,
};
use tracing_subscriber::EnvFilter;

const TOKEN_FILE: &str = ".ownblog_token";
const DEFAULT_SERVER: &str = "http://127.0.0.1:3000";
const SERVER_ENV: &str = "OWNBLOG_SERVER";

#[derive(Debug, Parser)]
#[command(name = "ownblog-cli", version, about = "CLI клиент для блог-сервиса ownblog")]
struct Cli {
    /// Адрес сервера (иначе берётся из OWNBLOG_SERVER или значение по умолчанию).
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Регистрация пользователя.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Вход пользователя. Токен сохраняется в .ownblog_token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Выход: удаляет сохранённый токен.
    Logout,
    /// Профиль владельца токена.
    Me,
    /// Смена отображаемого имени (требует токен).
    UpdateProfile {
        #[arg(long)]
        name: String,
    },
    /// Операции с постами.
    Blog {
        #[command(subcommand)]
        command: BlogCommand,
    },
    /// Операции с комментариями.
    Comment {
        #[command(subcommand)]
        command: CommentCommand,
    },
    /// Операции с каталогом тегов.
    Tag {
        #[command(subcommand)]
        command: TagCommand,
    },
}

#[derive(Debug, Subcommand)]
enum BlogCommand {
    /// Список постов владельца токена.
    List,
    /// Получение поста по id.
    Get {
        #[arg(long)]
        id: String,
    },
    /// Создание поста (теги указываются по id, можно несколько раз).
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Обновление поста.
    ///
    /// Если `--body` не указан, используется текущий текст поста.
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: Option<String>,
    },
    /// Удаление поста.
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Привязка тега к посту.
    AddTag {
        #[arg(long)]
        id: String,
        #[arg(long)]
        tag: String,
    },
    /// Отвязка тега от поста.
    RemoveTag {
        #[arg(long)]
        id: String,
        #[arg(long)]
        tag: String,
    },
}

#[derive(Debug, Subcommand)]
enum CommentCommand {
    /// Комментарии поста.
    List {
        #[arg(long)]
        blog: String,
    },
    /// Добавление комментария к посту.
    Add {
        #[arg(long)]
        blog: String,
        #[arg(long)]
        body: String,
    },
    /// Удаление комментария.
    Delete {
        #[arg(long)]
        blog: String,
        #[arg(long)]
        id: String,
    },
}

#[derive(Debug, Subcommand)]
enum TagCommand {
    /// Общий каталог тегов.
    List,
    /// Создание тега в общем каталоге.
    Create {
        #[arg(long)]
        name: String,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging("info")?;

    let cli = Cli::parse();

    let server = resolve_server(cli.server, std::env::var(SERVER_ENV).ok());
    let client = ApiClient::new(server);
    let store = FileTokenStore::new(TOKEN_FILE);

    match cli.command {
        Command::Signup {
            name,
            email,
            password,
        } => {
            let reply = client
                .sign_up(&name, &email, &password)
                .await
                .map_err(map_client_error)?;
            println!("Регистрация успешна: {reply}");
            println!("Выполните `ownblog-cli login --email {email} --password ...`");
        }
        Command::Login { email, password } => {
            let mut session = Session::new(client, store);
            if !session.login(&email, &password).await {
                bail!("неверный email или пароль");
            }
            let user = session
                .user()
                .context("сессия авторизована, но профиль не загружен")?;
            println!("Вход выполнен");
            print_user(user);
        }
        Command::Logout => {
            let mut session = Session::new(client, store);
            session.logout();
            println!("Выход выполнен, токен удалён");
        }
        Command::Me => {
            let mut session = Session::new(client, store);
            session.initialize().await;
            let Some(user) = session.user() else {
                bail!("требуется авторизация: выполните `ownblog-cli login ...`");
            };
            print_user(user);
        }
        Command::UpdateProfile { name } => {
            let token = require_token(&store)?;
            let user = client
                .update_profile(&token, &name)
                .await
                .map_err(map_client_error)?;
            println!("Профиль обновлён");
            print_user(&user);
        }
        Command::Blog { command } => run_blog(command, &client, &store).await?,
        Command::Comment { command } => run_comment(command, &client, &store).await?,
        Command::Tag { command } => run_tag(command, &client).await?,
    }

    Ok(())
}

async fn run_blog(command: BlogCommand, client: &ApiClient, store: &FileTokenStore) -> Result<()> {
    let token = require_token(store)?;

    match command {
        BlogCommand::List => {
            let blogs = client.list_blogs(&token).await.map_err(map_client_error)?;
            print_blog_list(&blogs);
        }
        BlogCommand::Get { id } => {
            let id = parse_id(&id, "поста")?;
            let blog = client
                .get_blog(&token, &id)
                .await
                .map_err(map_client_error)?;
            print_blog("Пост", &blog);
        }
        BlogCommand::Create { title, body, tags } => {
            let blog = client
                .create_blog(&token, &title, &body, &tags)
                .await
                .map_err(map_client_error)?;
            print_blog("Пост создан", &blog);
        }
        BlogCommand::Update { id, title, body } => {
            let id = parse_id(&id, "поста")?;
            // Если пользователь не передал --body, сохраняем текущий текст поста.
            let body = match body {
                Some(body) => body,
                None => {
                    client
                        .get_blog(&token, &id)
                        .await
                        .map_err(map_client_error)?
                        .body
                }
            };

            client
                .update_blog(&token, &id, &title, &body)
                .await
                .map_err(map_client_error)?;
            let blog = client
                .get_blog(&token, &id)
                .await
                .map_err(map_client_error)?;
            print_blog("Пост обновлён", &blog);
        }
        BlogCommand::Delete { id } => {
            let id = parse_id(&id, "поста")?;
            client
                .delete_blog(&token, &id)
                .await
                .map_err(map_client_error)?;
            println!("Пост удалён: id={id}");
        }
        BlogCommand::AddTag { id, tag } => {
            let id = parse_id(&id, "поста")?;
            client
                .add_tag_to_blog(&token, &id, &tag)
                .await
                .map_err(map_client_error)?;
            println!("Тег привязан: blog={id}, tag={tag}");
        }
        BlogCommand::RemoveTag { id, tag } => {
            let id = parse_id(&id, "поста")?;
            client
                .remove_tag_from_blog(&token, &id, &tag)
                .await
                .map_err(map_client_error)?;
            println!("Тег отвязан: blog={id}, tag={tag}");
        }
    }

    Ok(())
}

async fn run_comment(
    command: CommentCommand,
    client: &ApiClient,
    store: &FileTokenStore,
) -> Result<()> {
    let token = require_token(store)?;

    match command {
        CommentCommand::List { blog } => {
            let blog = parse_id(&blog, "поста")?;
            let comments = client
                .list_comments(&token, &blog)
                .await
                .map_err(map_client_error)?;
            print_comment_list(&comments);
        }
        CommentCommand::Add { blog, body } => {
            let blog = parse_id(&blog, "поста")?;
            let comment = client
                .add_comment(&token, &blog, &body)
                .await
                .map_err(map_client_error)?;
            print_comment("Комментарий добавлен", &comment);
        }
        CommentCommand::Delete { blog, id } => {
            let blog = parse_id(&blog, "поста")?;
            let id = parse_id(&id, "комментария")?;
            client
                .delete_comment(&token, &blog, &id)
                .await
                .map_err(map_client_error)?;
            println!("Комментарий удалён: id={id}");
        }
    }

    Ok(())
}

async fn run_tag(command: TagCommand, client: &ApiClient) -> Result<()> {
    match command {
        TagCommand::List => {
            let tags = client.list_tags().await.map_err(map_client_error)?;
            print_tag_list(&tags);
        }
        TagCommand::Create { name } => {
            let tag = client.create_tag(&name).await.map_err(map_client_error)?;
            println!("Тег создан");
            println!("id: {}", tag.id);
            println!("name: {}", tag.name);
        }
    }

    Ok(())
}

fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!("не удалось инициализировать логирование: {err}"))
}

fn resolve_server(flag: Option<String>, env: Option<String>) -> String {
    let raw = flag
        .or(env)
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());
    normalize_server(raw)
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn require_token(store: &FileTokenStore) -> Result<String> {
    store
        .load()
        .context("требуется авторизация: выполните `ownblog-cli login ...`")
}

fn parse_id(raw: &str, what: &str) -> Result<ObjectId> {
    ObjectId::parse(raw).with_context(|| format!("некорректный идентификатор {what}: {raw}"))
}

fn map_client_error(err: ClientError) -> anyhow::Error {
    let message = match err {
        ClientError::Unauthorized => {
            "требуется авторизация: выполните `ownblog-cli login ...`".to_string()
        }
        ClientError::NotFound => "ресурс не найден".to_string(),
        ClientError::Api(message) => format!("ошибка API: {message}"),
        ClientError::Http(err) => format!("ошибка HTTP: {err}"),
        ClientError::Decode(message) => format!("некорректный ответ сервера: {message}"),
    };
    anyhow::anyhow!(message)
}

fn print_user(user: &User) {
    println!("id: {}", user.id);
    println!("name: {}", user.name);
    println!("email: {}", user.email);
}

fn print_blog(title: &str, blog: &Blog) {
    println!("{title}");
    println!("id: {}", blog.id);
    println!("title: {}", blog.title);
    println!("body: {}", blog.body);
    println!("user_id: {}", blog.user_id);

    if blog.tags.is_empty() {
        println!("tags: -");
    } else {
        let names = blog
            .tags
            .iter()
            .map(|tag| tag.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        println!("tags: {names}");
    }
}

fn print_blog_list(blogs: &[Blog]) {
    println!("Постов: {}", blogs.len());

    for blog in blogs {
        println!("- [{}] {} (тегов: {})", blog.id, blog.title, blog.tags.len());
    }
}

fn print_comment(title: &str, comment: &Comment) {
    println!("{title}");
    println!("id: {}", comment.id);
    println!("body: {}", comment.body);
    println!("author: {} ({})", comment.user.name, comment.user.id);
}

fn print_comment_list(comments: &[Comment]) {
    println!("Комментариев: {}", comments.len());

    for comment in comments {
        println!("- [{}] {}: {}", comment.id, comment.user.name, comment.body);
    }
}

fn print_tag_list(tags: &[Tag]) {
    println!("Тегов: {}", tags.len());

    for tag in tags {
        println!("- [{}] {}", tag.id, tag.name);
    }
}
