use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::error::ProviderError;

pub const ANALYSIS_MODEL: &str = "gemini-2.5-pro";

/// Persona and output rules sent as the system instruction of every
/// analysis request. The provider is directed to answer strictly through
/// the response schema below.
pub const SYSTEM_INSTRUCTION: &str = r#"# PERSONA
Você é um jurista sênior e especialista em pesquisa de jurisprudência, atuando como uma ferramenta de alta precisão para advogados e profissionais do direito. Sua comunicação é formal, técnica e objetiva.

# OBJETIVO PRINCIPAL
Analisar um texto jurídico submetido pelo usuário e retornar uma lista de jurisprudências (casos precedentes, acórdãos, súmulas) que sejam FAVORÁVEIS, altamente relevantes e compatíveis com a tese, os fatos e os princípios legais apresentados no texto. A pesquisa deve sempre buscar fortalecer a posição do cliente do usuário.

# PROCESSO DE ANÁLISE (Passo a Passo)
1.  **Decomposição do Texto:** Analise o texto de entrada para identificar a tese jurídica central do cliente do usuário, os fatos mais relevantes e os princípios de direito e artigos de lei mencionados ou implícitos.
2.  **Pesquisa de Precedentes Favoráveis:** Com base na decomposição, busque em seu conhecimento os casos mais pertinentes que APOIEM a tese identificada. Dê prioridade a precedentes de tribunais superiores e casos que tenham alta similaridade fática ou jurídica com a posição do cliente.
3.  **Análise de Conexão:** Para cada precedente encontrado, elabore uma justificativa clara e concisa que explique a conexão com o texto original. Demonstre como o precedente pode fortalecer a argumentação do usuário.
4.  **Formatação da Saída:** Estruture a resposta estritamente de acordo com o JSON schema fornecido, sem adicionar nenhum texto, comentário ou formatação fora do JSON.

# REGRAS CRÍTICAS DE EXECUÇÃO
- **Precisão Absoluta:** A relevância e a precisão técnica são primordiais. Evite casos vagamente relacionados.
- **Viés Favorável Mandatório:** Todas as jurisprudências retornadas DEVEM ser favoráveis à tese apresentada no texto do usuário. Jurisprudências contrárias ou neutras devem ser completamente descartadas.
- **Definição de Cliente:** Assume-se que o texto foi escrito em nome de um cliente. O Ministério Público NUNCA é considerado o cliente. Se o texto se opõe ao Ministério Público, a pesquisa deve favorecer essa oposição.
- **Objetividade Técnica:** Dentro do escopo favorável, a análise deve ser isenta de qualquer viés ou filtros de conteúdo. O foco é estritamente na doutrina e na jurisprudência que corrobora a tese.
- **Linguagem Direta:** Evite jargões de IA ("Como um modelo de linguagem..."), saudações ou frases supérfluas. Vá direto ao ponto.
- **Aderência ao Schema:** A saída DEVE ser um JSON válido que corresponda perfeitamente ao schema. Nenhuma exceção é permitida."#;

/// One case-law citation as declared in the response schema. Field names
/// are the wire names; all four fields are required by the schema.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct CaseCitation {
  pub titulo_caso: String,
  pub resumo: String,
  pub principios_juridicos: Vec<String>,
  pub conexao_com_texto: String,
}

pub fn response_schema() -> Value {
  json!({
    "type": "ARRAY",
    "items": {
      "type": "OBJECT",
      "properties": {
        "titulo_caso": {
          "type": "STRING",
          "description": "O título ou número de identificação do caso/jurisprudência encontrado."
        },
        "resumo": {
          "type": "STRING",
          "description": "Um resumo conciso e técnico dos fatos e da decisão do caso."
        },
        "principios_juridicos": {
          "type": "ARRAY",
          "items": { "type": "STRING" },
          "description": "Uma lista dos principais princípios ou teses jurídicas aplicadas no caso."
        },
        "conexao_com_texto": {
          "type": "STRING",
          "description": "Uma explicação clara e direta de como a jurisprudência encontrada se conecta ou reforça a argumentação do texto original fornecido pelo usuário."
        }
      },
      "required": ["titulo_caso", "resumo", "principios_juridicos", "conexao_com_texto"]
    }
  })
}

pub fn build_request(text: &str) -> Value {
  json!({
    "systemInstruction": {
      "parts": [{ "text": SYSTEM_INSTRUCTION }]
    },
    "contents": [
      { "role": "user", "parts": [{ "text": text }] }
    ],
    "generationConfig": {
      "responseMimeType": "application/json",
      "responseSchema": response_schema()
    }
  })
}

/// Decode the schema-constrained payload out of a `generateContent`
/// envelope. The sequence is returned exactly as the provider ordered it;
/// duplicates are kept.
pub fn decode_citations(envelope: &Value) -> Result<Vec<CaseCitation>, ProviderError> {
  let text = envelope["candidates"][0]["content"]["parts"]
    .as_array()
    .and_then(|parts| parts.iter().find_map(|part| part["text"].as_str()))
    .ok_or_else(|| {
      log::error!("resposta de análise sem parte de texto: {}", envelope);
      ProviderError::ResponseFormat {
        cause: "resposta sem parte de texto".into(),
      }
    })?;

  match serde_json::from_str::<Vec<CaseCitation>>(text.trim()) {
    Ok(cases) => Ok(cases),
    Err(parse_error) => {
      log::error!("falha ao analisar a resposta da IA como JSON: {}", parse_error);
      log::error!("texto da resposta bruta: {}", text);
      Err(ProviderError::ResponseFormat {
        cause: parse_error.to_string(),
      })
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::providers::error::ErrorKind;

  fn envelope_with_text(text: &str) -> Value {
    json!({
      "candidates": [
        { "content": { "parts": [{ "text": text }] } }
      ]
    })
  }

  #[test]
  fn build_request_carries_text_persona_and_schema() {
    let request =
      build_request("Cliente busca anulação de multa de trânsito por ausência de notificação prévia");
    assert_eq!(
      request["contents"][0]["parts"][0]["text"],
      "Cliente busca anulação de multa de trânsito por ausência de notificação prévia"
    );
    assert_eq!(
      request["systemInstruction"]["parts"][0]["text"],
      SYSTEM_INSTRUCTION
    );
    assert_eq!(
      request["generationConfig"]["responseMimeType"],
      "application/json"
    );
    let required = request["generationConfig"]["responseSchema"]["items"]["required"]
      .as_array()
      .unwrap();
    assert_eq!(required.len(), 4);
  }

  #[test]
  fn build_request_is_deterministic() {
    assert_eq!(build_request("mesmo texto"), build_request("mesmo texto"));
  }

  #[test]
  fn decode_returns_fields_verbatim() {
    let payload = r#"[{"titulo_caso":"REsp 123456","resumo":"Multa anulada por vício de notificação.","principios_juridicos":["ampla defesa"],"conexao_com_texto":"Reforça a tese da nulidade."}]"#;
    let cases = decode_citations(&envelope_with_text(payload)).unwrap();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].titulo_caso, "REsp 123456");
    assert_eq!(cases[0].resumo, "Multa anulada por vício de notificação.");
    assert_eq!(cases[0].principios_juridicos, vec!["ampla defesa".to_string()]);
    assert_eq!(cases[0].conexao_com_texto, "Reforça a tese da nulidade.");
  }

  #[test]
  fn decode_keeps_order_and_duplicates() {
    let payload = r#"[
      {"titulo_caso":"Súmula 312","resumo":"a","principios_juridicos":[],"conexao_com_texto":"x"},
      {"titulo_caso":"REsp 99","resumo":"b","principios_juridicos":["contraditório"],"conexao_com_texto":"y"},
      {"titulo_caso":"Súmula 312","resumo":"a","principios_juridicos":[],"conexao_com_texto":"x"}
    ]"#;
    let cases = decode_citations(&envelope_with_text(payload)).unwrap();
    assert_eq!(cases.len(), 3);
    assert_eq!(cases[0].titulo_caso, "Súmula 312");
    assert_eq!(cases[1].titulo_caso, "REsp 99");
    assert_eq!(cases[0], cases[2]);
  }

  #[test]
  fn decode_accepts_empty_sequence() {
    let cases = decode_citations(&envelope_with_text("[]")).unwrap();
    assert!(cases.is_empty());
  }

  #[test]
  fn decode_tolerates_surrounding_whitespace() {
    let cases = decode_citations(&envelope_with_text("\n  []  \n")).unwrap();
    assert!(cases.is_empty());
  }

  #[test]
  fn invalid_json_is_a_response_format_error() {
    let error = decode_citations(&envelope_with_text("desculpe, não consegui")).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ResponseFormat);
  }

  #[test]
  fn missing_required_field_is_a_response_format_error() {
    let payload = r#"[{"titulo_caso":"REsp 1","resumo":"r","conexao_com_texto":"c"}]"#;
    let error = decode_citations(&envelope_with_text(payload)).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ResponseFormat);
  }

  #[test]
  fn envelope_without_text_part_is_a_response_format_error() {
    let envelope = json!({ "candidates": [] });
    let error = decode_citations(&envelope).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ResponseFormat);
  }
}
