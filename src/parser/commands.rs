use tracing::debug;

use crate::labels::resolve_computed_index;
use crate::lexer::{Keyword, TokenKind};
use crate::parser::expressions::Parser;
use crate::parser::{Command, GotoTarget, LabeledCommand, ParserError, Program};

impl Parser {
    /// Parse a complete program: `CommandSeq END`, with nothing after `END`.
    ///
    /// # Errors
    /// Returns the first syntax or semantic error; parsing stops there.
    pub fn parse_program(&mut self) -> Result<Program, ParserError> {
        debug!(tokens = self.token_count(), "parsing program");

        let commands = self.parse_command_sequence()?;
        self.expect_keyword(Keyword::End)?;

        if !self.is_at_end() {
            return Err(self.error_expected("end of input after 'END'"));
        }

        debug!(
            commands = commands.len(),
            labels = self.labels().len(),
            "program accepted"
        );
        Ok(Program { commands })
    }

    /// Parse `WrappedCmd (';' WrappedCmd)*`
    fn parse_command_sequence(&mut self) -> Result<Vec<LabeledCommand>, ParserError> {
        let mut commands = vec![self.parse_labeled_command()?];

        while self.match_token(&TokenKind::Semicolon) {
            commands.push(self.parse_labeled_command()?);
        }

        Ok(commands)
    }

    /// Parse `[Identifier ':'] Command`
    pub(crate) fn parse_labeled_command(&mut self) -> Result<LabeledCommand, ParserError> {
        let offset = self.current_offset();

        let label = if self.at_label_definition() {
            let index = self.position();
            let name = self.expect_identifier("label")?;
            self.expect(&TokenKind::Colon, "':'")?;

            if let Err(first) = self.labels_mut().define(&name, offset) {
                return Err(ParserError::DuplicateLabel {
                    name,
                    offset,
                    index,
                    first_offset: first.offset,
                });
            }
            Some(name)
        } else {
            None
        };

        let command = self.parse_command()?;
        Ok(LabeledCommand::new(label, command, offset))
    }

    fn at_label_definition(&self) -> bool {
        matches!(self.peek_kind(), Some(TokenKind::Identifier(_)))
            && matches!(self.peek_ahead(1).map(|t| &t.kind), Some(TokenKind::Colon))
    }

    /// Parse a single command, or the empty command before a terminator
    fn parse_command(&mut self) -> Result<Command, ParserError> {
        match self.peek_kind() {
            Some(TokenKind::Keyword(Keyword::Let)) => self.parse_assignment(),
            Some(TokenKind::Keyword(Keyword::Go)) => self.parse_goto(),
            Some(TokenKind::Keyword(Keyword::Read)) => self.parse_read(),
            Some(TokenKind::Keyword(Keyword::Print)) => self.parse_print(),
            Some(TokenKind::Keyword(Keyword::If)) => self.parse_if(),

            // Empty command: the caller decides whether what follows is legal
            None
            | Some(TokenKind::Keyword(Keyword::End))
            | Some(TokenKind::Keyword(Keyword::Else))
            | Some(TokenKind::Semicolon) => Ok(Command::Empty),

            _ => Err(self.error_expected("a command")),
        }
    }

    /// Parse `LET Identifier := Expr`
    fn parse_assignment(&mut self) -> Result<Command, ParserError> {
        self.expect_keyword(Keyword::Let)?;
        let target = self.expect_identifier("identifier after 'LET'")?;
        self.expect(&TokenKind::Assign, "':='")?;
        let value = self.parse_expression()?;

        Ok(Command::Let { target, value })
    }

    /// Parse `GO TO Identifier` or `GO TO Number OF LabelList`
    fn parse_goto(&mut self) -> Result<Command, ParserError> {
        self.expect_keyword(Keyword::Go)?;
        self.expect_keyword(Keyword::To)?;

        match self.peek_kind() {
            Some(TokenKind::Identifier(_)) => {
                let label = self.expect_identifier("label")?;
                Ok(Command::Goto(GotoTarget::Label(label)))
            }
            Some(TokenKind::Number(digits)) => {
                let numeral = digits.clone();
                let offset = self.current_offset();
                let index = self.position();
                self.advance();

                self.expect_keyword(Keyword::Of)?;
                let labels = self.parse_identifier_list("label")?;

                let Some(selected) = resolve_computed_index(&numeral, labels.len()) else {
                    return Err(ParserError::IndexOutOfRange {
                        numeral,
                        count: labels.len(),
                        offset,
                        index,
                    });
                };

                Ok(Command::Goto(GotoTarget::Computed {
                    index: selected,
                    labels,
                }))
            }
            _ => Err(self.error_expected("label or number after 'GO TO'")),
        }
    }

    /// Parse `READ IdentList`
    fn parse_read(&mut self) -> Result<Command, ParserError> {
        self.expect_keyword(Keyword::Read)?;
        let names = self.parse_identifier_list("identifier")?;

        Ok(Command::Read(names))
    }

    /// Parse `PRINT ExprList`
    fn parse_print(&mut self) -> Result<Command, ParserError> {
        self.expect_keyword(Keyword::Print)?;
        let values = self.parse_expression_list()?;

        Ok(Command::Print(values))
    }

    /// Parse `IF Expr RelOp Expr THEN WrappedCmd ELSE WrappedCmd`
    fn parse_if(&mut self) -> Result<Command, ParserError> {
        self.enter_nesting()?;
        let command = self.parse_if_body();
        self.exit_nesting();
        command
    }

    fn parse_if_body(&mut self) -> Result<Command, ParserError> {
        self.expect_keyword(Keyword::If)?;

        let left = self.parse_expression()?;
        let op = self.parse_relational_op()?;
        let right = self.parse_expression()?;

        self.expect_keyword(Keyword::Then)?;
        let then_branch = self.parse_labeled_command()?;

        self.expect_keyword(Keyword::Else)?;
        let else_branch = self.parse_labeled_command()?;

        Ok(Command::If {
            left,
            op,
            right,
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    /// Parse `Identifier (',' Identifier)*`
    fn parse_identifier_list(&mut self, item: &str) -> Result<Vec<String>, ParserError> {
        let mut names = vec![self.expect_identifier(item)?];

        while self.match_token(&TokenKind::Comma) {
            names.push(self.expect_identifier(&format!("{item} after ','"))?);
        }

        Ok(names)
    }
}
