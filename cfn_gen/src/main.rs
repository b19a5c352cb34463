use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::io::Write;

#[derive(Debug, Serialize, Deserialize)]
struct Parameters {
    bucket_name: String,
    prompt_key_name: String,
    model_id: String,
    memory_size: u16,
    timeout: u16,
    log_retention_in_days: u16,
    architecture: String,
}

fn main() -> Result<()> {
    let parameters = load_parameters("parameters.yml")?;
    validate(&parameters)?;
    let cfn = build_cloudformation(&parameters);
    create_template_file("template.yml", &cfn)?;

    Ok(())
}

fn load_parameters(path: &str) -> Result<Parameters> {
    let parameters = fs::read_to_string(path)?;
    parse_parameters(&parameters)
}

fn parse_parameters(yaml: &str) -> Result<Parameters> {
    let parameters: Parameters = serde_yaml::from_str(yaml)?;

    Ok(parameters)
}

fn validate(parameters: &Parameters) -> Result<()> {
    if parameters.bucket_name.is_empty() {
        bail!("bucket_name must not be empty");
    }
    if parameters.model_id.is_empty() {
        bail!("model_id must not be empty");
    }
    if !matches!(parameters.architecture.as_str(), "arm64" | "x86_64") {
        bail!(
            "architecture must be arm64 or x86_64, got {}",
            parameters.architecture
        );
    }

    Ok(())
}

fn build_cloudformation(parameters: &Parameters) -> String {
    let mut builder = String::new();

    // Setup the template
    builder.push_str(&format!(
        r#"---
AWSTemplateFormatVersion: 2010-09-09
Transform: AWS::Serverless-2016-10-31
Description: S3 Bedrock Evaluator
Globals:
  Function:
    Timeout: {}
    MemorySize: {}
    Environment:
      Variables:
        BUCKET_NAME: {}
        PROMPT_KEY_NAME: {}
        MODEL_ID: {}"#,
        &parameters.timeout,
        &parameters.memory_size,
        &parameters.bucket_name,
        &parameters.prompt_key_name,
        &parameters.model_id
    ));

    builder.push_str(
        "
Resources:",
    );

    // Bucket
    builder.push_str(&format!(
        r#"
  BucketUploads:
    Type: AWS::S3::Bucket
    Properties:
      BucketName: {}"#,
        &parameters.bucket_name
    ));

    // IAM Role
    builder.push_str(&format!(
        r#"
  RoleObjectHandler:
    Type: AWS::IAM::Role
    Properties:
      RoleName: !Sub "iam-${{AWS::Region}}-s3-bedrock-evaluator-role"
      Path: /
      AssumeRolePolicyDocument:
        Version: 2012-10-17
        Statement:
          - Effect: Allow
            Principal:
              Service: lambda.amazonaws.com
            Action: sts:AssumeRole
      ManagedPolicyArns:
        - arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole
      Policies:
        - PolicyName: !Sub "iam-${{AWS::Region}}-s3-bedrock-evaluator-policy"
          PolicyDocument:
            Version: 2012-10-17
            Statement:
              - Effect: Allow
                Action:
                  - s3:ListBucket
                Resource: arn:aws:s3:::{}
              - Effect: Allow
                Action:
                  - s3:GetObject
                Resource: arn:aws:s3:::{}/*
              - Effect: Allow
                Action:
                  - bedrock:InvokeModel
                Resource: !Sub "arn:aws:bedrock:${{AWS::Region}}::foundation-model/{}""#,
        &parameters.bucket_name, &parameters.bucket_name, &parameters.model_id
    ));

    // Lambda function
    builder.push_str(&format!(
        r#"
  LambdaObjectHandler:
    Type: AWS::Serverless::Function
    Properties:
      FunctionName: s3-bedrock-evaluator
      Description: S3 Bedrock Evaluator | Object Handler
      Runtime: provided.al2
      Architectures: [{}]
      Handler: bootstrap
      Role: !GetAtt RoleObjectHandler.Arn
      CodeUri: target/lambda/object_handler/
      Events:
        ObjectCreated:
          Type: S3
          Properties:
            Bucket: !Ref BucketUploads
            Events: s3:ObjectCreated:*"#,
        &parameters.architecture
    ));

    // Log group
    builder.push_str(&format!(
        r#"
  LogsObjectHandler:
    Type: AWS::Logs::LogGroup
    Properties:
      LogGroupName: !Sub "/aws/lambda/${{LambdaObjectHandler}}"
      RetentionInDays: {}
"#,
        &parameters.log_retention_in_days
    ));

    builder
}

fn create_template_file(path: &str, content: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMETERS: &str = "
bucket_name: uploads
prompt_key_name: rubric.txt
model_id: anthropic.claude-3-sonnet-20240229-v1:0
memory_size: 256
timeout: 90
log_retention_in_days: 7
architecture: arm64
";

    #[test]
    fn template_wires_bucket_trigger_and_environment() {
        let parameters = parse_parameters(PARAMETERS).unwrap();
        validate(&parameters).unwrap();

        let cfn = build_cloudformation(&parameters);

        assert!(cfn.starts_with("---\nAWSTemplateFormatVersion: 2010-09-09"));
        assert!(cfn.contains("        BUCKET_NAME: uploads"));
        assert!(cfn.contains("        PROMPT_KEY_NAME: rubric.txt"));
        assert!(cfn.contains("        MODEL_ID: anthropic.claude-3-sonnet-20240229-v1:0"));
        assert!(cfn.contains("    Timeout: 90"));
        assert!(cfn.contains("    MemorySize: 256"));
        assert!(cfn.contains("Resource: arn:aws:s3:::uploads/*"));
        assert!(cfn.contains("foundation-model/anthropic.claude-3-sonnet-20240229-v1:0"));
        assert!(cfn.contains("Events: s3:ObjectCreated:*"));
        assert!(cfn.contains("RetentionInDays: 7"));
        assert!(cfn.contains("${AWS::Region}"));
    }

    #[test]
    fn template_is_valid_yaml() {
        let parameters = parse_parameters(PARAMETERS).unwrap();

        let cfn = build_cloudformation(&parameters);

        assert!(serde_yaml::from_str::<serde_yaml::Value>(&cfn).is_ok());
    }

    #[test]
    fn rejects_unknown_architecture() {
        let parameters = parse_parameters(&PARAMETERS.replace("arm64", "riscv")).unwrap();

        assert!(validate(&parameters).is_err());
    }

    #[test]
    fn rejects_empty_bucket() {
        let parameters =
            parse_parameters(&PARAMETERS.replace("bucket_name: uploads", "bucket_name: ''")).unwrap();

        assert!(validate(&parameters).is_err());
    }
}
