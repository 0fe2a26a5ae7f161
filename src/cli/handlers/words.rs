// src/cli/handlers/words.rs

use anyhow::Result;
use colored::Colorize;

use super::{Context, commons};
use crate::{core::sections, system::console::Console};

pub fn add(ctx: &mut Context<'_>) -> Result<()> {
    let section = commons::resolve_section(ctx)?;
    let word = commons::required_text(ctx, "word", t!("words.prompt.word"))?;
    let translation = commons::required_text(ctx, "translation", t!("words.prompt.translation"))?;
    let phrase = commons::optional_text(ctx, "phrase", t!("words.prompt.phrase"))?;

    let stored = sections::add_word(&ctx.env.store, &section, &word, &translation, &phrase)?;

    let message = format!(
        t!("words.success.added"),
        word = stored.word.bold(),
        translation = stored.translation,
        section = section.cyan()
    );
    commons::success(ctx.env, &message);
    Ok(())
}

pub fn list(ctx: &mut Context<'_>) -> Result<()> {
    let section = commons::resolve_section(ctx)?;
    let default_size = ctx.env.config.page_size;
    let size = match ctx.arg("size") {
        Some(_) => commons::count_arg(ctx, "size", "", default_size)?,
        None => default_size,
    };
    let first_page = commons::page_arg(ctx);
    let mode = ctx.mode;

    commons::browse(
        ctx.env,
        mode,
        first_page,
        |ws, page| sections::list_words(&ws.store, &section, page, size),
        |ws, page| {
            ws.write_line(
                &format!(
                    t!("words.list.header"),
                    section = section.cyan(),
                    page = page.current_page,
                    pages = page.total_pages.max(1),
                    total = page.total
                )
                .bold()
                .to_string(),
            );
            if page.items.is_empty() {
                ws.write_line(&t!("words.info.empty").yellow().to_string());
            }
            commons::print_words(ws, &page.items, page.offset);
        },
    )
}

/// Review drill: a random sample of the section. Interactive runs show the
/// word first and reveal the translation on Enter.
pub fn random(ctx: &mut Context<'_>) -> Result<()> {
    let section = commons::resolve_section(ctx)?;
    let default_count = ctx.env.config.random_count;
    let count = commons::count_arg(ctx, "count", t!("words.prompt.count"), default_count)?;

    let ws = &mut *ctx.env;
    let picked = sections::random_words(&ws.store, &section, count, &mut ws.rng)?;

    ws.write_line(
        &format!(
            t!("words.random.header"),
            count = picked.len(),
            section = section.cyan()
        )
        .bold()
        .to_string(),
    );

    if !ctx.is_interactive() {
        commons::print_words(ctx.env, &picked, 0);
        return Ok(());
    }

    for (i, word) in picked.iter().enumerate() {
        let prompt = format!("{:>3}. {}  ", i + 1, word.word.bold());
        if ctx.env.read_line(&prompt)?.is_none() {
            return Ok(());
        }
        ctx.env.write_line(&commons::format_word(i + 1, word));
    }
    ctx.env.write_line(t!("words.random.done"));
    Ok(())
}

pub fn search(ctx: &mut Context<'_>) -> Result<()> {
    let keyword = commons::required_text(ctx, "keyword", t!("words.prompt.keyword"))?;
    let scope = commons::explicit_section(ctx);

    let hits = sections::search_words(&ctx.env.store, &keyword, scope.as_deref())?;

    ctx.env.write_line(
        &format!(
            t!("words.search.header"),
            keyword = keyword,
            count = hits.len()
        )
        .bold()
        .to_string(),
    );
    for (i, hit) in hits.iter().enumerate() {
        let line = commons::format_word(i + 1, &hit.word);
        if scope.is_some() {
            ctx.env.write_line(&line);
        } else {
            ctx.env
                .write_line(&format!("{}  {}", line, format!("[{}]", hit.section).cyan()));
        }
    }
    Ok(())
}

pub fn remove(ctx: &mut Context<'_>) -> Result<()> {
    let section = commons::resolve_section(ctx)?;
    let word = commons::required_text(ctx, "word", t!("words.prompt.remove"))?;

    sections::remove_word(&ctx.env.store, &section, &word)?;

    let message = format!(
        t!("words.success.removed"),
        word = word.bold(),
        section = section.cyan()
    );
    commons::success(ctx.env, &message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::workspace::testing::{command, interactive, printed, workspace};
    use crate::core::section_store::SectionStore;
    use crate::models::Word;

    #[test]
    fn test_add_then_list_through_commands() {
        let (_dir, mut ws, output) = workspace(&[]);
        ws.store.create_section("day1").unwrap();

        command(&mut ws, &["add", "cat", "chat", "le chat dort", "--section", "day1"]).unwrap();
        command(&mut ws, &["add", "dog", "chien", "--section=day1"]).unwrap();
        command(&mut ws, &["list", "--section", "day1"]).unwrap();

        let section = ws.store.get_section("day1").unwrap();
        assert_eq!(section.words.len(), 2);
        assert_eq!(section.words[0].phrase, "le chat dort");

        let text = printed(&output);
        assert!(text.contains("1. cat - chat"));
        assert!(text.contains("2. dog - chien"));
    }

    #[test]
    fn test_word_commands_fall_back_to_last_section() {
        let (_dir, mut ws, _output) = workspace(&[]);
        command(&mut ws, &["create", "day1"]).unwrap();

        command(&mut ws, &["add", "cat", "chat"]).unwrap();
        assert_eq!(ws.store.get_section("day1").unwrap().words.len(), 1);
    }

    #[test]
    fn test_word_commands_use_configured_default_section() {
        let (_dir, mut ws, _output) = workspace(&[]);
        ws.store.create_section("inbox").unwrap();
        ws.config.default_section = Some("inbox".into());

        command(&mut ws, &["add", "cat", "chat"]).unwrap();
        assert_eq!(ws.store.get_section("inbox").unwrap().words.len(), 1);
    }

    #[test]
    fn test_no_section_anywhere_is_an_error() {
        let (_dir, mut ws, _output) = workspace(&[]);
        let err = command(&mut ws, &["add", "cat", "chat"]).unwrap_err();
        assert!(err.to_string().contains("No section"));
    }

    #[test]
    fn test_add_missing_translation_fails() {
        let (_dir, mut ws, _output) = workspace(&[]);
        ws.store.create_section("day1").unwrap();

        let err = command(&mut ws, &["add", "cat", "--section", "day1"]).unwrap_err();
        assert!(err.to_string().contains("translation"));
    }

    #[test]
    fn test_list_paging_flags() {
        let (_dir, mut ws, output) = workspace(&[]);
        ws.store.create_section("day1").unwrap();
        for i in 1..=12 {
            ws.store
                .add_word("day1", Word::new(format!("w{}", i), format!("t{}", i), ""))
                .unwrap();
        }

        command(&mut ws, &["list", "--section", "day1", "--page", "3", "--size", "5"]).unwrap();
        let text = printed(&output);
        assert!(text.contains("3/3"));
        assert!(text.contains("11. w11"));
        assert!(!text.contains("10. w10"));
    }

    #[test]
    fn test_random_count_is_capped() {
        let (_dir, mut ws, output) = workspace(&[]);
        ws.store.create_section("day1").unwrap();
        for word in ["a", "b", "c"] {
            ws.store.add_word("day1", Word::new(word, "x", "")).unwrap();
        }

        command(&mut ws, &["random", "10", "--section", "day1"]).unwrap();
        let text = printed(&output);
        assert!(text.contains("3 random"));
        assert!(text.contains("3. "));
        assert!(!text.contains("4. "));
    }

    #[test]
    fn test_random_rejects_zero() {
        let (_dir, mut ws, _output) = workspace(&[]);
        ws.store.create_section("day1").unwrap();
        ws.store.add_word("day1", Word::new("a", "x", "")).unwrap();

        assert!(command(&mut ws, &["random", "--count", "0", "--section", "day1"]).is_err());
    }

    #[test]
    fn test_search_across_all_sections() {
        let (_dir, mut ws, output) = workspace(&[]);
        ws.store.create_section("day1").unwrap();
        ws.store.create_section("day2").unwrap();
        ws.store.add_word("day1", Word::new("Cat", "chat", "")).unwrap();
        ws.store.add_word("day2", Word::new("category", "catégorie", "")).unwrap();
        ws.store.add_word("day2", Word::new("dog", "chien", "")).unwrap();

        command(&mut ws, &["search", "--keyword=cat"]).unwrap();
        let text = printed(&output);
        assert!(text.contains("2 result"));
        assert!(text.contains("[day1]") && text.contains("[day2]"));
    }

    #[test]
    fn test_search_with_bare_keyword() {
        let (_dir, mut ws, output) = workspace(&[]);
        ws.store.create_section("day1").unwrap();
        ws.store.add_word("day1", Word::new("cat", "chat", "")).unwrap();

        command(&mut ws, &["search", "CAT", "--section", "day1"]).unwrap();
        let text = printed(&output);
        assert!(text.contains("1 result"));
        assert!(text.contains("1. cat - chat"));
    }

    #[test]
    fn test_remove_word() {
        let (_dir, mut ws, _output) = workspace(&[]);
        ws.store.create_section("day1").unwrap();
        ws.store.add_word("day1", Word::new("cat", "chat", "")).unwrap();

        command(&mut ws, &["remove", "cat", "--section", "day1"]).unwrap();
        assert!(ws.store.get_section("day1").unwrap().words.is_empty());
        assert!(command(&mut ws, &["remove", "cat", "--section", "day1"]).is_err());
    }

    #[test]
    fn test_interactive_create_select_and_add() {
        let inputs = [
            "1", "1", "day1", // sections > create "day1"
            "2", "1", // select > first section
            "1", "apple", "pomme", "", // add word without phrase
            "2", // list words
            "q",
        ];
        let (_dir, mut ws, output) = workspace(&inputs);

        interactive(&mut ws);

        let section = ws.store.get_section("day1").unwrap();
        assert_eq!(section.words, vec![Word::new("apple", "pomme", "")]);
        assert!(printed(&output).contains("1. apple - pomme"));
    }

    #[test]
    fn test_interactive_failed_add_returns_to_word_menu() {
        let inputs = ["1", "2", "1", "1", "", "", "", "3", "", "", "q"];
        let (_dir, mut ws, output) = workspace(&inputs);
        ws.store.create_section("day1").unwrap();
        ws.store.add_word("day1", Word::new("cat", "chat", "")).unwrap();

        interactive(&mut ws);

        let text = printed(&output);
        assert!(text.contains("The word cannot be empty."));
        assert!(text.contains("1 random"));
        assert_eq!(ws.store.get_section("day1").unwrap().words.len(), 1);
    }
}
