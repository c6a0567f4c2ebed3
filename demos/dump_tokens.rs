//! Print the tokens of a small Terraform-style document.

use hcl_lexer::{Lexer, TokenKind};

fn main() {
    let input = r#"resource "aws_instance" "web" {
  ami  = var.ami_id
  tags = {
    Name = "web-${var.env}"
  }
  user_data = <<-EOT
    #!/bin/sh
    echo "%{ if var.debug }debug%{ endif }"
  EOT
}
"#;

    for token in Lexer::new(input) {
        if token.kind.is_trivia() {
            continue;
        }
        println!(
            "{:>3}:{:<3} {:<40} {:?}",
            token.start.line,
            token.start.column,
            format!("{:?}", token.kind),
            token.text
        );
        if let TokenKind::HeredocClose {
            min_indent: Some(width),
        } = token.kind
        {
            println!("        heredoc body indented by {width}");
        }
    }
}
