//! End-to-end rewrite behaviour on realistic PHP snippets.

mod common;

use common::{assert_fixed, assert_untouched, fix, fix_with, machine, php};
use php_aif::{Context, Error, LexErrorKind, Options, TokenKind, fix_str, tokenize};

// -----------------------------------------------------------
// The rewrite itself.
// -----------------------------------------------------------

#[test]
fn bare_subscript_is_quoted() {
    assert_fixed("$a[b] = 'c';", "$a['b'] = 'c';");
}

#[test]
fn bare_subscript_on_constant_is_quoted() {
    assert_fixed("a[b];", "a['b'];");
}

#[test]
fn only_the_subscript_changes() {
    let input = php("$x = 1;\n$a[b] = $x + 2; // done");
    let output = fix(&input);
    assert_eq!(output, php("$x = 1;\n$a['b'] = $x + 2; // done"));
}

#[test]
fn chained_subscripts() {
    assert_fixed("$a[b][c] = 1;", "$a['b']['c'] = 1;");
}

#[test]
fn several_statements() {
    assert_fixed(
        "$row[id] = $row[name];\nunset($row[tmp]);",
        "$row['id'] = $row['name'];\nunset($row['tmp']);",
    );
}

#[test]
fn subscript_after_property_access() {
    assert_fixed("$this->data[key];", "$this->data['key'];");
}

#[test]
fn inner_subscript_of_variable_key() {
    assert_fixed("$a[$b[c]];", "$a[$b['c']];");
}

#[test]
fn crlf_line_endings() {
    let output = fix("<?php\r\n$a[b];\r\n");
    assert_eq!(output, "<?php\r\n$a['b'];\r\n");
}

#[test]
fn true_is_a_bare_word() {
    assert_fixed("$a[true];", "$a['true'];");
}

// -----------------------------------------------------------
// Subscripts that stay as they are.
// -----------------------------------------------------------

#[test]
fn already_single_quoted() {
    assert_untouched("$a['b'] = 'c';");
}

#[test]
fn already_double_quoted() {
    assert_untouched("$a[\"b\"] = 'c';");
}

#[test]
fn member_access_subscript() {
    assert_untouched("$d = $e[$f->g];");
}

#[test]
fn member_access_on_bare_word_quotes_only_the_first_word() {
    // `e` directly follows `[`; `g` follows `->`.
    assert_fixed("d[e->g];", "d['e'->g];");
}

#[test]
fn variable_and_number_subscripts() {
    assert_untouched("$a[$i] = $a[0] + $a[-1] + $a[1.5];");
}

#[test]
fn whitespace_before_word() {
    assert_untouched("$a[ b ];");
}

#[test]
fn keyword_subscript() {
    assert_untouched("$a[empty];");
}

#[test]
fn qualified_names() {
    assert_untouched("$a[\\FOO] = $a[Foo\\BAR];");
}

#[test]
fn comments_are_left_alone() {
    assert_untouched("// $a[b]\n# $a[b]\n/* $a[b] */\n/** $a[b] */");
}

#[test]
fn inline_html_is_left_alone() {
    let input = "<p>$a[b]</p>\n<?php $a[b]; ?>\n<p>$a[b]</p>";
    let output = fix(input);
    assert_eq!(output, "<p>$a[b]</p>\n<?php $a['b']; ?>\n<p>$a[b]</p>");
}

#[test]
fn attribute_is_not_a_subscript() {
    assert_untouched("#[Route]\nfunction f() {}");
}

// -----------------------------------------------------------
// String literal immunity.
// -----------------------------------------------------------

#[test]
fn interpolated_double_quoted() {
    assert_untouched("$b = \"$a[b]\";");
}

#[test]
fn escaped_quotes_inside_double_quoted() {
    assert_untouched("$c = \" \\\"$a[b]\\\" \";");
}

#[test]
fn single_quoted_literal() {
    assert_untouched("$c = ' \\\"$a[b]\\\" ';");
}

#[test]
fn curly_interpolation() {
    assert_untouched("echo \"{$a[b]} and ${c[d]}\";");
}

#[test]
fn string_then_code() {
    assert_fixed("$b = \"$a[b]\"; $a[b] = 1;", "$b = \"$a[b]\"; $a['b'] = 1;");
}

// -----------------------------------------------------------
// Heredoc and backtick literals.
// -----------------------------------------------------------

const HEREDOC: &str = "$h = <<<EOT\nv $a[b]\nEOT;\n$a[c];";

#[test]
fn heredoc_is_guarded_by_default() {
    assert_fixed(HEREDOC, "$h = <<<EOT\nv $a[b]\nEOT;\n$a['c'];");
}

#[test]
fn heredoc_is_rewritten_with_loose_literals() {
    let options = Options::new().strict_literals(false);
    let output = fix_with(&php(HEREDOC), options);
    assert_eq!(output, php("$h = <<<EOT\nv $a['b']\nEOT;\n$a['c'];"));
}

#[test]
fn nowdoc_is_never_rewritten() {
    assert_untouched("$h = <<<'EOT'\nv $a[b]\nEOT;");
    let options = Options::new().strict_literals(false);
    let input = php("$h = <<<'EOT'\nv $a[b]\nEOT;");
    assert_eq!(fix_with(&input, options), input);
}

#[test]
fn backtick_is_guarded_by_default() {
    let body = "$out = `ls $a[b]`;";
    assert_eq!(fix(&php(body)), php(body));

    let options = Options::new().strict_literals(false);
    assert_eq!(fix_with(&php(body), options), php("$out = `ls $a['b']`;"));
}

#[test]
fn literal_followed_by_string_is_stable_across_passes() {
    for body in [
        "$h = <<<EOT\nv $a[b]\nEOT;\n$t = \"$x[y]\";\n",
        "$s = `ls $a[b]`; $t = \"$x[y]\";",
    ] {
        let once = fix(&php(body));
        assert_eq!(once, php(body));
        assert_eq!(fix(&once), once);
    }
}

#[test]
fn loose_literals_break_a_second_pass() {
    // The quoted offset is no longer valid interpolation, so the lexer
    // reads `'b']` as text and the `]` never closes the subscript.
    let options = Options::new().strict_literals(false);
    let input = php("$s = `ls $a[b]`; $t = \"$x[y]\";");
    let once = fix_with(&input, options);
    assert_eq!(once, php("$s = `ls $a['b']`; $t = \"$x[y]\";"));
    assert_ne!(fix_with(&once, options), once);
}

// -----------------------------------------------------------
// Whole-subscript-only mode.
// -----------------------------------------------------------

#[test]
fn calls_and_static_access_are_quoted_by_default() {
    assert_fixed("$a[f()] = $a[A::B];", "$a['f'()] = $a['A'::B];");
}

#[test]
fn whole_subscript_only_leaves_expressions() {
    let options = Options::new().whole_subscript_only(true);
    let input = php("$a[f()] = $a[A::B] + $a[c];");
    let output = fix_with(&input, options);
    assert_eq!(output, php("$a[f()] = $a[A::B] + $a['c'];"));
}

// -----------------------------------------------------------
// Edge cases with pinned behaviour.
// -----------------------------------------------------------

#[test]
fn nested_bracket_quotes_both_words() {
    assert_fixed("$a[b[c]];", "$a['b'['c']];");
}

#[test]
fn nested_bracket_ends_in_default() {
    let m = machine(&php("$a[b[c]];"), Options::new());
    let words: Vec<_> = m.rewrites().iter().map(|r| r.word.as_str()).collect();
    assert_eq!(words, vec!["b", "c"]);
    assert_eq!(m.context(), Context::Default);
}

#[test]
fn interpolated_string_inside_subscript_is_not_guarded() {
    let input = php("$a[\"$b[c]\"];");
    assert_eq!(fix(&input), php("$a[\"$b['c']\"];"));
    let m = machine(&input, Options::new());
    // The closing quote is then read as an opening one.
    assert_eq!(m.context(), Context::InDoubleQuoted);
}

#[test]
fn short_array_literal_is_treated_as_subscript() {
    assert_fixed("$x = [FOO, BAR];", "$x = ['FOO', BAR];");
}

// -----------------------------------------------------------
// Whole-pass properties.
// -----------------------------------------------------------

const SAMPLE: &str = "$a[b] = 'c';\n$b = \"$a[b]\";\n$c = \" \\\"$a[b]\\\" \";\n$d = $e[$f->g];\n$x[y][z] = $x[$k];";

#[test]
fn idempotent() {
    let once = fix(&php(SAMPLE));
    let twice = fix(&once);
    assert_eq!(once, twice);
}

#[test]
fn token_order_is_preserved() {
    let input = php(SAMPLE);
    let before = tokenize(&input).expect("tokenize");
    let m = machine(&input, Options::new());
    let after = m.tokens();

    assert_eq!(before.len(), after.len());
    for (old, new) in before.iter().zip(after) {
        assert_eq!(old.span, new.span);
        if old.text != new.text {
            assert_eq!(old.kind, TokenKind::Identifier);
            assert_eq!(new.kind, TokenKind::ConstantEncapsedString);
            assert_eq!(new.text, format!("'{}'", old.text));
        } else {
            assert_eq!(old.kind, new.kind);
        }
    }
    assert_eq!(m.rewrites().len(), 3);
}

#[test]
fn empty_source() {
    assert_eq!(fix(""), "");
}

#[test]
fn lex_error_is_propagated() {
    let err = fix_str("<?php $a[b] = 'c;", Options::new()).unwrap_err();
    let Error::Lex(lex) = err;
    assert_eq!(lex.kind, LexErrorKind::UnterminatedString);
    assert_eq!(lex.span.line, 1);
    assert_eq!(lex.span.column, 15);
}
