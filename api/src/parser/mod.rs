//! Profile File Parser

use super::*;
use pest::iterators::*;
use pest::Parser;
use sss_core::fileutil::*;
use sss_core::pbrt::*;
use std::result::Result;

/// The `pest` parser generated from a grammar.
#[derive(Parser)]
#[grammar = "parser/grammar.pest"]
struct ProfileParser;

/// Parses a profile description file and registers its profiles with the API.
///
/// * `path` - Path to the file.
/// * `api`  - The API interface.
pub fn parse(path: &str, api: &mut Api) -> Result<(), String> {
    let mut include_stack = vec![];
    ProfileFileParser::new(path)?.parse(api, &mut include_stack)
}

/// Parses profile descriptions from a string. Relative includes are resolved
/// against `dir`.
///
/// * `source` - The profile descriptions.
/// * `dir`    - Directory used for relative includes.
/// * `api`    - The API interface.
pub fn parse_str(source: &str, dir: &str, api: &mut Api) -> Result<(), String> {
    let parser = ProfileFileParser {
        file_path: String::from("<string>"),
        parent_path: String::from(dir),
    };
    let mut include_stack = vec![];
    parser.parse_source(source, api, &mut include_stack)
}

/// Profile description file parser.
pub struct ProfileFileParser {
    /// Path to the file to parse.
    file_path: String,

    /// Parent path for resolving includes.
    parent_path: String,
}

impl ProfileFileParser {
    /// Returns a new instance of `ProfileFileParser`.
    ///
    /// * `path` - File path.
    pub fn new(path: &str) -> Result<Self, String> {
        let parent = parent_path(path).ok_or(format!("Invalid path '{}'", path))?;
        Ok(Self {
            file_path: String::from(path),
            parent_path: parent,
        })
    }

    /// Reads the file and calls the API for every statement.
    ///
    /// * `api`           - The API interface.
    /// * `include_stack` - Files currently being parsed.
    fn parse(&self, api: &mut Api, include_stack: &mut Vec<String>) -> Result<(), String> {
        if include_stack.contains(&self.file_path) {
            return Err(format!("Recursive include of '{}'", self.file_path));
        }

        let source = file_to_string(&self.file_path)?;
        include_stack.push(self.file_path.clone());
        let result = self.parse_source(&source, api, include_stack);
        include_stack.pop();
        result
    }

    /// Parses the contents of a file and calls the API for every statement.
    ///
    /// * `source`        - Contents of the file.
    /// * `api`           - The API interface.
    /// * `include_stack` - Files currently being parsed.
    fn parse_source(
        &self,
        source: &str,
        api: &mut Api,
        include_stack: &mut Vec<String>,
    ) -> Result<(), String> {
        let file = ProfileParser::parse(Rule::file, source)
            .map_err(|err| format!("Error parsing '{}'. {}", self.file_path, err))?
            .next()
            .ok_or(format!("Error parsing '{}'. Empty input.", self.file_path))?;

        for pair in file.into_inner() {
            match pair.as_rule() {
                Rule::include_stmt => self.parse_include_stmt(pair.into_inner(), api, include_stack)?,
                Rule::subsurface_profile_stmt => {
                    self.parse_subsurface_profile_stmt(pair.into_inner(), api)?
                }
                Rule::EOI => (), // Done
                _ => unreachable!(),
            }
        }

        Ok(())
    }

    /// Parse an `include_stmt` rule of the grammar. The included file is
    /// parsed entirely before returning.
    ///
    /// * `pairs`         - The inner token pairs for matched `include_stmt` rule.
    /// * `api`           - The API interface.
    /// * `include_stack` - Files currently being parsed.
    fn parse_include_stmt(
        &self,
        mut pairs: Pairs<Rule>,
        api: &mut Api,
        include_stack: &mut Vec<String>,
    ) -> Result<(), String> {
        let path = resolve_path(&self.parent_path, &self.parse_quoted_str(&mut pairs)?);
        debug!("Include: '{}'", path);

        Self::new(&path)?.parse(api, include_stack)?;
        debug!("Finished parsing include '{}'", path);
        Ok(())
    }

    /// Parse a `subsurface_profile_stmt` rule of the grammar and call the API.
    ///
    /// * `pairs` - The inner token pairs for matched `subsurface_profile_stmt` rule.
    /// * `api`   - The API interface.
    fn parse_subsurface_profile_stmt(
        &self,
        mut pairs: Pairs<Rule>,
        api: &mut Api,
    ) -> Result<(), String> {
        let name = self.parse_quoted_str(&mut pairs)?;

        let mut params = ParamSet::new();
        for pair in pairs {
            self.parse_param(pair.into_inner(), &mut params)?;
        }

        debug!("SubsurfaceProfile '{}' {}", name, params);
        api.subsurface_profile(&name, &params);
        Ok(())
    }

    /// Parse a `param` rule of the grammar and add the parameter to a
    /// `ParamSet`.
    ///
    /// * `pairs`  - The inner token pairs for matched `param` rule.
    /// * `params` - The `ParamSet` to update.
    fn parse_param(&self, mut pairs: Pairs<Rule>, params: &mut ParamSet) -> Result<(), String> {
        let mut decl = next_pair(&mut pairs)?.into_inner();
        let param_type = next_pair(&mut decl)?.as_str();
        let ident = next_pair(&mut decl)?.as_str();

        let value = next_pair(&mut pairs)?;
        let values: Vec<Pair<Rule>> = match value.as_rule() {
            Rule::value_list => value.into_inner().collect(),
            _ => vec![value],
        };

        match param_type {
            "float" => {
                let list = self.parse_float_list(ident, &values)?;
                params.add_float(ident, &list);
            }
            "integer" => {
                let list = values
                    .iter()
                    .map(|v| self.parse_int(ident, v))
                    .collect::<Result<Vec<Int>, String>>()?;
                params.add_int(ident, &list);
            }
            "bool" => {
                let list = values
                    .iter()
                    .map(|v| self.parse_bool(ident, v))
                    .collect::<Result<Vec<bool>, String>>()?;
                params.add_bool(ident, &list);
            }
            "rgb" | "color" => {
                let list = self.parse_float_list(ident, &values)?;
                if list.is_empty() || list.len() % 3 != 0 {
                    return Err(format!(
                        "{}: '{}' expects RGB triples but has {} values",
                        self.file_path,
                        ident,
                        list.len()
                    ));
                }
                params.add_rgb_spectrum(ident, &list);
            }
            "string" => {
                let list = values
                    .iter()
                    .map(|v| self.parse_string(ident, v))
                    .collect::<Result<Vec<String>, String>>()?;
                params.add_string(ident, &list);
            }
            _ => {
                return Err(format!(
                    "{}: unknown parameter type '{}' for '{}'",
                    self.file_path, param_type, ident
                ))
            }
        }

        Ok(())
    }

    /// Converts `number` tokens to a list of `Float`.
    ///
    /// * `ident`  - Parameter name.
    /// * `values` - The value tokens.
    fn parse_float_list(&self, ident: &str, values: &[Pair<Rule>]) -> Result<Vec<Float>, String> {
        values
            .iter()
            .map(|v| match v.as_rule() {
                Rule::number => v
                    .as_str()
                    .parse::<Float>()
                    .map_err(|e| format!("{}: '{}' {}", self.file_path, ident, e)),
                _ => Err(self.type_mismatch(ident, "number", v)),
            })
            .collect()
    }

    /// Converts a `number` token to an `Int`.
    ///
    /// * `ident` - Parameter name.
    /// * `value` - The value token.
    fn parse_int(&self, ident: &str, value: &Pair<Rule>) -> Result<Int, String> {
        match value.as_rule() {
            Rule::number => value
                .as_str()
                .parse::<Int>()
                .map_err(|e| format!("{}: '{}' {}", self.file_path, ident, e)),
            _ => Err(self.type_mismatch(ident, "integer", value)),
        }
    }

    /// Converts a `bool` or quoted `"true"`/`"false"` token to a `bool`.
    ///
    /// * `ident` - Parameter name.
    /// * `value` - The value token.
    fn parse_bool(&self, ident: &str, value: &Pair<Rule>) -> Result<bool, String> {
        let s = match value.as_rule() {
            Rule::bool => value.as_str(),
            Rule::quoted_str => unquote(value),
            _ => return Err(self.type_mismatch(ident, "bool", value)),
        };
        s.parse::<bool>()
            .map_err(|_| self.type_mismatch(ident, "bool", value))
    }

    /// Converts a `quoted_str` token to a `String`.
    ///
    /// * `ident` - Parameter name.
    /// * `value` - The value token.
    fn parse_string(&self, ident: &str, value: &Pair<Rule>) -> Result<String, String> {
        match value.as_rule() {
            Rule::quoted_str => Ok(String::from(unquote(value))),
            _ => Err(self.type_mismatch(ident, "string", value)),
        }
    }

    /// Parse a `quoted_str` rule of the grammar and return the unquoted
    /// `String` value.
    ///
    /// * `pairs` - The token pairs starting at a `quoted_str` rule.
    fn parse_quoted_str(&self, pairs: &mut Pairs<Rule>) -> Result<String, String> {
        let pair = next_pair(pairs)?;
        match pair.as_rule() {
            Rule::quoted_str => Ok(String::from(unquote(&pair))),
            _ => unreachable!(),
        }
    }

    /// Returns an error describing a value of the wrong type.
    fn type_mismatch(&self, ident: &str, expected: &str, value: &Pair<Rule>) -> String {
        format!(
            "{}: '{}' expects {} values, found '{}'",
            self.file_path,
            ident,
            expected,
            value.as_str()
        )
    }
}

/// Returns the next token pair or an error if the grammar produced none.
///
/// * `pairs` - The token pairs.
fn next_pair<'i>(pairs: &mut Pairs<'i, Rule>) -> Result<Pair<'i, Rule>, String> {
    pairs
        .next()
        .ok_or_else(|| String::from("Unexpected end of statement"))
}

/// Returns the text inside a `quoted_str` token.
///
/// * `pair` - The `quoted_str` token.
fn unquote<'i>(pair: &Pair<'i, Rule>) -> &'i str {
    pair.clone()
        .into_inner()
        .next()
        .map_or("", |s| s.as_str())
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
