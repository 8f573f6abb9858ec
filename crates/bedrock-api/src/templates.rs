//! HTML page templates.
//!
//! Plain `format!` templates. Catalog text goes through `html_escape`:
//! `encode_text` for element content, `encode_double_quoted_attribute` for
//! attribute values. The only unescaped input is documentation HTML, which
//! `bedrock_content::render_html` has already sanitized.

use bedrock_content::{Catalog, ToolRecord};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

const SITE_TITLE: &str = "Bedrock PowerPoint";
const SITE_DESCRIPTION: &str = "Uma equipe de jogos em PowerPoint.";

const CARD: &str = "bg-white border rounded-lg shadow-lg";
const BUTTON: &str = "bg-white border rounded-lg shadow-lg p-2 h-[max-content] text-gray-800 font-semibold";
const TAG: &str = "bg-blue-600 select-none text-xs text-white font-bold rounded-full shadow-sm py-1 px-4";

const FEATURES: &[(&str, &str)] = &[
    (
        "🛠️ Ferramentas",
        "Diversas ferramentas úteis em VBA, desenvolvidas para agilizar o trabalho dos desenvolvedores.",
    ),
    (
        "💻 Linguagens",
        "Desenvolvimento de linguagens baseadas em VBA, criando novas possibilidades para programação.",
    ),
    (
        "🧰 Recursos",
        "Desenvolvemos soluções específicas para membros da comunidade com códigos simplificados e explicados.",
    ),
    ("🙋‍ Suporte", "Ajudamos a tirar dúvidas sobre problemas com o VBA."),
];

const TESTIMONIALS: &[(&str, &str)] = &[
    (
        "As ferramentas da Bedrock simplificaram o desenvolvimento VBA e elevaram a qualidade dos nossos projetos!",
        "Erickssen, CEO da Erilab",
    ),
    (
        "A Bedrock trouxe soluções VBA que realmente melhoraram nosso fluxo de trabalho e nos fizeram economizar muito tempo.",
        "Arfur, Desenvolvedor de jogos",
    ),
    (
        "Eu amei o fato que a Bedrock consegue transformar qualquer tarefa complexa em algo bobo de simples.",
        "Figames, Criador de Snowland",
    ),
    (
        "Cara, eu precisava muito de uma função de Wait que permitisse trabalhar com várias ao mesmo tempo, Bedrock proporcionou a melhor solução de todas, rs.",
        "Primagi, Criador de Wendel",
    ),
    ("Oi.", "Fabinho, Internauta"),
];

/// Page metadata for `<head>`.
#[derive(Debug, Clone)]
pub struct PageMeta<'a> {
    /// `<title>` and `og:title`.
    pub title: &'a str,
    /// `description` and `og:description`.
    pub description: &'a str,
    /// `og:image`, if any.
    pub image: Option<&'a str>,
    /// Load highlight.js for code blocks.
    pub highlight: bool,
}

impl Default for PageMeta<'_> {
    fn default() -> Self {
        Self {
            title: SITE_TITLE,
            description: SITE_DESCRIPTION,
            image: None,
            highlight: false,
        }
    }
}

/// Wrap a body fragment in the site layout.
pub fn layout(meta: &PageMeta<'_>, body: &str) -> String {
    let title = text(meta.title);
    let title_attr = attr(meta.title);
    let description = attr(meta.description);
    let mut head = format!(
        r#"<meta property="og:title" content="{title_attr}">
<meta property="og:description" content="{description}">
<meta property="og:type" content="website">
<meta name="twitter:card" content="summary_large_image">
"#
    );
    if let Some(image) = meta.image {
        head.push_str(&format!(
            r#"<meta property="og:image" content="{}">"#,
            attr(image)
        ));
        head.push('\n');
    }
    if meta.highlight {
        head.push_str(concat!(
            r#"<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.6.0/styles/github.min.css">"#,
            "\n",
            r#"<script src="https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.6.0/highlight.min.js"></script>"#,
            "\n",
            r#"<script>document.addEventListener("DOMContentLoaded", () => hljs.highlightAll());</script>"#,
            "\n",
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<meta name="description" content="{description}">
{head}<script src="https://cdn.tailwindcss.com?plugins=typography"></script>
</head>
<body class="antialiased">
{body}
</body>
</html>
"#
    )
}

fn tag_badges(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!(r#"<p class="{TAG}">{}</p>"#, text(tag)))
        .collect::<Vec<_>>()
        .join("")
}

/// Marketing home page body.
pub fn home() -> String {
    let features: String = FEATURES
        .iter()
        .map(|(title, text)| {
            format!(
                r#"<div class="{CARD} text-gray-800 p-6"><h3 class="font-bold text-xl flex items-center gap-2">{title}</h3><p class="mt-2">{text}</p></div>"#
            )
        })
        .collect();
    let testimonials: String = TESTIMONIALS
        .iter()
        .map(|(text, author)| {
            format!(
                r#"<div class="{CARD} text-gray-800 h-auto p-6"><p class="italic">&quot;{text}&quot;</p><p class="text-right mt-4 font-semibold">- {author}</p></div>"#
            )
        })
        .collect();

    format!(
        r#"<div class="min-h-screen text-gray-800 py-12 px-6">
<div class="container mx-auto max-w-3xl text-center">
<h1 class="font-extrabold text-6xl mb-6">Bedrock</h1>
<p class="text-2xl font-light mb-8">Ferramentas inovadoras para desenvolvedores VBA em qualquer área.</p>
<p class="text-lg mb-8 leading-relaxed">Nossa missão é transformar o VBA em uma plataforma versátil e poderosa. Seja desenvolvendo jogos, sistemas operacionais, ou qualquer outra aplicação, temos as ferramentas e a expertise para facilitar seu trabalho e expandir o potencial do VBA.</p>
<div class="w-[max-content] mx-auto"><a href="/ferramentas" class="{CARD} p-4 text-gray-800 font-semibold">Ver Ferramentas</a></div>
</div>
<div id="features" class="container mx-auto max-w-4xl mt-20 px-6">
<h2 class="text-center text-3xl font-bold mb-8">O que fazemos</h2>
<div class="grid grid-cols-1 md:grid-cols-3 gap-8">{features}</div>
</div>
<div class="container mx-auto max-w-4xl mt-20 px-6">
<h2 class="text-center text-3xl font-bold mb-8">O que nossos clientes dizem</h2>
<div class="grid grid-cols-1 md:grid-cols-2 gap-8">{testimonials}</div>
</div>
</div>"#
    )
}

/// Catalog listing page body.
pub fn tools_index(catalog: &Catalog) -> String {
    let cards: String = catalog
        .tools()
        .iter()
        .map(|tool| {
            let name = text(&tool.name);
            format!(
                r#"<div class="{CARD} p-6 flex flex-col items-center">
<img src="{image}" alt="{alt} logo" class="w-[50px] h-[50px] object-contain mb-4 rounded-lg">
<div class="mx-auto my-1 flex flex-wrap items-center gap-2">{tags}</div>
<h3 class="text-xl font-bold text-indigo-700 mb-2">{name}</h3>
<p class="text-gray-700 text-center">{description}</p>
<a href="/ferramentas/documentacao/{id}" class="{CARD} p-4 text-gray-800 font-semibold mt-5">Documentação</a>
</div>"#,
                image = attr(&tool.image),
                alt = attr(&tool.name),
                tags = tag_badges(&tool.tags),
                description = text(&tool.description),
                id = attr(&tool.id),
            )
        })
        .collect();

    format!(
        r#"<div class="py-12 px-6">
<div class="container mx-auto max-w-5xl">
<div class="flex items-center gap-3 mb-10">
<a href="/" class="{BUTTON}">&larr;</a>
<h2 class="text-4xl mx-auto font-bold">Ferramentas</h2>
</div>
<div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-8">{cards}</div>
</div>
</div>"#
    )
}

/// Tool detail page body. `documentation` must already be sanitized HTML.
pub fn tool_detail(tool: &ToolRecord, documentation: &str) -> String {
    let download = if tool.has_package() {
        format!(
            r#"<a href="/api/download?ferramenta={}" class="{BUTTON}">Baixar Pacote</a>"#,
            attr(&tool.id)
        )
    } else {
        String::new()
    };

    format!(
        r#"<div class="py-12 px-6">
<div class="container mx-auto max-w-5xl">
<div class="flex items-center gap-3 mb-10">
<a href="/ferramentas" class="{BUTTON}">&larr;</a>
{download}
</div>
<div class="pl-[1rem] mx-auto max-w-[800px]">
<img src="{image}" alt="{alt} logo" class="w-[80px] h-[80px] object-contain rounded-lg">
</div>
<div class="pl-[1rem] mx-auto max-w-[800px] mt-5 flex flex-wrap items-center gap-2">{tags}</div>
<div class="prose mx-auto max-w-[800px]">
{documentation}
</div>
</div>
</div>"#,
        image = attr(&tool.image),
        alt = attr(&tool.name),
        tags = tag_badges(&tool.tags),
    )
}

/// Body for an unknown tool.
pub fn tool_not_found() -> String {
    format!(
        r#"<div class="py-12 px-6">
<div class="container mx-auto max-w-5xl">
<div class="flex items-center gap-3 mb-10">
<a href="/ferramentas" class="{BUTTON}">&larr;</a>
</div>
<h1 class="text-xl font-semibold text-gray-800">Ferramenta não encontrada</h1>
<p class="text-gray-600">A ferramenta solicitada não existe ou foi removida.</p>
</div>
</div>"#
    )
}
