use crate::{DeclarationError, NamingConvention};
use schemadeclare_config::ConfigManager;
use serde::Deserialize;

/// Configuration section name
pub const CONFIG_SECTION: &str = "graphql";

/// GraphQL schema configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphQLConfig {
    /// Name of the query root type
    pub query_type_name: String,

    /// Name of the mutation root type
    pub mutation_type_name: String,

    /// How handler parameter names become argument names
    pub naming: NamingConvention,

    /// Enable introspection queries
    pub enable_introspection: bool,

    /// Maximum query depth (0 = unlimited)
    pub max_depth: usize,

    /// Maximum query complexity (0 = unlimited)
    pub max_complexity: usize,

    /// Enable Apollo Tracing
    pub enable_tracing: bool,
}

impl GraphQLConfig {
    /// Create a new GraphQL configuration with defaults
    ///
    /// # Example
    ///
    /// ```
    /// use schemadeclare_graphql::{GraphQLConfig, NamingConvention};
    ///
    /// let config = GraphQLConfig::new();
    /// assert_eq!(config.query_type_name, "Query");
    /// assert_eq!(config.naming, NamingConvention::Camel);
    /// assert!(config.enable_introspection);
    /// ```
    pub fn new() -> Self {
        Self {
            query_type_name: "Query".to_string(),
            mutation_type_name: "Mutation".to_string(),
            naming: NamingConvention::default(),
            enable_introspection: true,
            max_depth: 0,
            max_complexity: 0,
            enable_tracing: false,
        }
    }

    /// Create a production configuration (introspection disabled)
    ///
    /// # Example
    ///
    /// ```
    /// use schemadeclare_graphql::GraphQLConfig;
    ///
    /// let config = GraphQLConfig::production();
    /// assert!(!config.enable_introspection);
    /// assert!(!config.enable_tracing);
    /// ```
    pub fn production() -> Self {
        let mut config = Self::new();
        config.enable_introspection = false;
        config
    }

    /// Create a development configuration (introspection and tracing enabled)
    pub fn development() -> Self {
        let mut config = Self::new();
        config.enable_introspection = true;
        config.enable_tracing = true;
        config
    }

    /// Read the `graphql` section; a missing section yields the defaults
    pub fn from_config(config: &ConfigManager) -> Result<Self, DeclarationError> {
        Ok(config.section(CONFIG_SECTION)?)
    }

    /// Set the query root type name
    pub fn with_query_type_name(mut self, name: impl Into<String>) -> Self {
        self.query_type_name = name.into();
        self
    }

    /// Set the mutation root type name
    pub fn with_mutation_type_name(mut self, name: impl Into<String>) -> Self {
        self.mutation_type_name = name.into();
        self
    }

    /// Set the argument naming convention
    pub fn with_naming(mut self, naming: NamingConvention) -> Self {
        self.naming = naming;
        self
    }

    /// Enable or disable introspection queries
    pub fn with_introspection(mut self, enable: bool) -> Self {
        self.enable_introspection = enable;
        self
    }

    /// Set maximum query depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set maximum query complexity
    pub fn with_max_complexity(mut self, complexity: usize) -> Self {
        self.max_complexity = complexity;
        self
    }

    /// Enable or disable Apollo Tracing
    pub fn with_tracing(mut self, enable: bool) -> Self {
        self.enable_tracing = enable;
        self
    }
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemadeclare_config::FileFormat;

    #[test]
    fn test_default_config() {
        let config = GraphQLConfig::default();
        assert_eq!(config.mutation_type_name, "Mutation");
        assert!(config.enable_introspection);
        assert_eq!(config.max_depth, 0);
    }

    #[test]
    fn test_production_config() {
        let config = GraphQLConfig::production();
        assert!(!config.enable_introspection);
        assert!(!config.enable_tracing);
    }

    #[test]
    fn test_development_config() {
        let config = GraphQLConfig::development();
        assert!(config.enable_introspection);
        assert!(config.enable_tracing);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GraphQLConfig::new()
            .with_query_type_name("RootQuery")
            .with_naming(NamingConvention::Verbatim)
            .with_max_depth(10)
            .with_max_complexity(100);

        assert_eq!(config.query_type_name, "RootQuery");
        assert_eq!(config.naming, NamingConvention::Verbatim);
        assert_eq!(config.max_depth, 10);
        assert_eq!(config.max_complexity, 100);
    }

    #[test]
    fn test_from_config_section() {
        let manager = ConfigManager::new();
        manager
            .load_str(
                r#"
                [graphql]
                naming = "verbatim"
                max_depth = 5
                enable_tracing = true
                "#,
                FileFormat::Toml,
            )
            .unwrap();

        let config = GraphQLConfig::from_config(&manager).unwrap();
        assert_eq!(config.naming, NamingConvention::Verbatim);
        assert_eq!(config.max_depth, 5);
        assert!(config.enable_tracing);
        assert_eq!(config.query_type_name, "Query");
    }

    #[test]
    fn test_camel_words_convention() {
        let manager = ConfigManager::new();
        manager
            .load_str(r#"{"graphql": {"naming": "camel_words"}}"#, FileFormat::Json)
            .unwrap();

        let config = GraphQLConfig::from_config(&manager).unwrap();
        assert_eq!(config.naming, NamingConvention::CamelWords);
    }

    #[test]
    fn test_missing_section_uses_defaults() {
        let config = GraphQLConfig::from_config(&ConfigManager::new()).unwrap();
        assert_eq!(config, GraphQLConfig::default());
    }

    #[test]
    fn test_invalid_section() {
        let manager = ConfigManager::new();
        manager
            .load_str(r#"{"graphql": {"naming": "kebab"}}"#, FileFormat::Json)
            .unwrap();

        assert!(GraphQLConfig::from_config(&manager).is_err());
    }
}
