// Mounting generated resolvers into a dynamic schema

use crate::{
    ArgumentBag, DeclarationError, FieldDescriptor, FieldResolver, GraphQLConfig, GraphQLRequest,
    GraphQLResponse, InstanceProvider, ResolverGenerator,
};
use async_graphql::dynamic::{Field, FieldFuture, FieldValue, InputValue, Object, Schema, Type};
use async_graphql::extensions::ApolloTracing;
use async_graphql::{Request, Variables};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Query and mutation fields to expose, plus how to resolve them
pub struct SchemaDeclaration {
    config: GraphQLConfig,
    generator: ResolverGenerator,
    query: Vec<FieldDescriptor>,
    mutation: Vec<FieldDescriptor>,
    types: Vec<Type>,
}

impl SchemaDeclaration {
    pub fn new(provider: InstanceProvider) -> Self {
        Self::with_config(provider, GraphQLConfig::default())
    }

    /// Declaration whose naming convention and limits come from `config`
    pub fn with_config(provider: InstanceProvider, config: GraphQLConfig) -> Self {
        Self {
            generator: ResolverGenerator::from_config(provider, &config),
            config,
            query: Vec::new(),
            mutation: Vec::new(),
            types: Vec::new(),
        }
    }

    /// Replace the resolver generator, e.g. to inject a naming policy
    pub fn generator(mut self, generator: ResolverGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn query(mut self, field: FieldDescriptor) -> Self {
        self.query.push(field);
        self
    }

    pub fn mutation(mut self, field: FieldDescriptor) -> Self {
        self.mutation.push(field);
        self
    }

    /// Register a type referenced by parameters or outputs, e.g. an enum or
    /// input object
    pub fn register(mut self, ty: impl Into<Type>) -> Self {
        self.types.push(ty.into());
        self
    }

    pub fn config(&self) -> &GraphQLConfig {
        &self.config
    }

    /// Build the schema
    ///
    /// The query root must declare at least one field; the mutation root is
    /// only registered when it has fields.
    pub fn build(self) -> Result<DeclaredSchema, DeclarationError> {
        let Self {
            config,
            generator,
            query,
            mutation,
            types,
        } = self;

        if query.is_empty() {
            return Err(DeclarationError::EmptyRoot(config.query_type_name));
        }

        let query = generate_root(&generator, &config.query_type_name, query)?;
        let mutation = if mutation.is_empty() {
            None
        } else {
            Some(generate_root(&generator, &config.mutation_type_name, mutation)?)
        };

        let mut builder = Schema::build(
            &config.query_type_name,
            mutation.as_ref().map(|_| config.mutation_type_name.as_str()),
            None,
        )
        .register(root_object(&config.query_type_name, query.values(), &generator));

        if let Some(mutation) = &mutation {
            builder = builder.register(root_object(
                &config.mutation_type_name,
                mutation.values(),
                &generator,
            ));
        }

        for ty in types {
            builder = builder.register(ty);
        }

        if config.max_depth > 0 {
            builder = builder.limit_depth(config.max_depth);
        }
        if config.max_complexity > 0 {
            builder = builder.limit_complexity(config.max_complexity);
        }
        if !config.enable_introspection {
            builder = builder.disable_introspection();
        }
        if config.enable_tracing {
            builder = builder.extension(ApolloTracing);
        }

        let schema = builder
            .finish()
            .map_err(|e| DeclarationError::Schema(e.to_string()))?;

        info!(
            query_fields = query.len(),
            mutation_fields = mutation.as_ref().map_or(0, IndexMap::len),
            "GraphQL schema built"
        );

        Ok(DeclaredSchema {
            schema,
            config: Arc::new(config),
        })
    }
}

fn generate_root(
    generator: &ResolverGenerator,
    type_name: &str,
    fields: Vec<FieldDescriptor>,
) -> Result<IndexMap<String, FieldResolver>, DeclarationError> {
    let mut resolvers = IndexMap::with_capacity(fields.len());
    for field in fields {
        let name = field.name().to_string();
        if resolvers.contains_key(&name) {
            return Err(DeclarationError::DuplicateField {
                type_name: type_name.to_string(),
                field: name,
            });
        }
        resolvers.insert(name, generator.generate(Arc::new(field)));
    }
    Ok(resolvers)
}

fn root_object<'a>(
    type_name: &str,
    resolvers: impl Iterator<Item = &'a FieldResolver>,
    generator: &ResolverGenerator,
) -> Object {
    resolvers.fold(Object::new(type_name), |object, resolver| {
        object.field(engine_field(resolver, generator))
    })
}

fn engine_field(resolver: &FieldResolver, generator: &ResolverGenerator) -> Field {
    let descriptor = resolver.field();
    let resolver = Arc::new(resolver.clone());

    debug!(field = descriptor.name(), "Mounting field");

    let mut field = Field::new(descriptor.name(), descriptor.output().clone(), move |ctx| {
        let resolver = resolver.clone();
        FieldFuture::new(async move {
            let bag = ArgumentBag::from_accessor(&ctx.args);
            match resolver.resolve(bag.as_ref()).await {
                Ok(value) => Ok(Some(FieldValue::value(value))),
                Err(err) => Err(async_graphql::Error::from(err)),
            }
        })
    });

    if let Some(description) = descriptor.get_description() {
        field = field.description(description);
    }

    for param in descriptor.params() {
        let name = generator.binder().argument_name(param);
        let mut input = InputValue::new(name, param.ty().clone());
        if let Some(default) = param.default_value() {
            input = input.default_value(default.clone());
        }
        if let Some(description) = param.get_description() {
            input = input.description(description);
        }
        field = field.argument(input);
    }

    field
}

/// A built schema, ready to execute requests
#[derive(Clone)]
pub struct DeclaredSchema {
    schema: Schema,
    config: Arc<GraphQLConfig>,
}

impl DeclaredSchema {
    /// Execute a request
    pub async fn execute(&self, request: GraphQLRequest) -> GraphQLResponse {
        let mut engine_request = Request::new(request.query);
        if let Some(variables) = request.variables {
            engine_request = engine_request.variables(Variables::from_json(variables));
        }
        if let Some(operation_name) = request.operation_name {
            engine_request = engine_request.operation_name(operation_name);
        }

        let response = self.schema.execute(engine_request).await;
        let errors: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();

        match response.data.into_json() {
            Ok(serde_json::Value::Null) => GraphQLResponse {
                data: None,
                errors,
            },
            Ok(data) => GraphQLResponse {
                data: Some(data),
                errors,
            },
            Err(e) => GraphQLResponse::error(e.to_string()),
        }
    }

    /// Schema in SDL form
    pub fn sdl(&self) -> String {
        self.schema.sdl()
    }

    pub fn config(&self) -> &GraphQLConfig {
        &self.config
    }

    /// The underlying engine schema
    pub fn inner(&self) -> &Schema {
        &self.schema
    }
}
